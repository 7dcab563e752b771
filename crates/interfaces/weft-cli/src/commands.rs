use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use weft_app_core::app_core::AppCommand;
use weft_app_core::ports::IntentResolver;
use weft_app_core::viewmodel;
use weft_app_core::{ConsoleKernel, ConsoleStore, DemoIntentResolver};
use weft_core::RunStatus;

use crate::OutputFormat;

/// Grace period on top of the pipeline's own declared delays before a run
/// is considered wedged and cancelled.
const RUN_GRACE: Duration = Duration::from_secs(10);

pub fn cmd_submit(text: &str, instant: bool, format: OutputFormat) -> anyhow::Result<()> {
    let resolver = Arc::new(if instant {
        DemoIntentResolver::instant()
    } else {
        DemoIntentResolver::new()
    });

    // Preview the pipeline to size the wait deadline.
    let eta = resolver
        .resolve(text)
        .map(|spec| spec.total_delay())
        .unwrap_or_default();

    let mut kernel = ConsoleKernel::new(ConsoleStore::default(), resolver);

    let spinner = match format {
        OutputFormat::Text => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );

            let feed_pb = pb.clone();
            kernel.bus().subscribe(move |event| {
                feed_pb.println(viewmodel::format_feed_line(event));
                if let Some(chain) = &event.focus {
                    feed_pb.println(format!("   :: focus -> {chain}"));
                }
            });
            Some(pb)
        }
        OutputFormat::Json => {
            kernel.bus().subscribe(|event| match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("failed to encode event: {e}"),
            });
            None
        }
    };

    if matches!(format, OutputFormat::Text) {
        println!(":: Microchain client initialized");
        println!(":: Submitting intent: {text}");
    }

    kernel.dispatch(AppCommand::SubmitIntent(text.to_string()));
    if let Some(err) = kernel.store.state().last_error {
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        anyhow::bail!("intent rejected: {err}");
    }

    if let Some(pb) = &spinner {
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Processing");
    }

    let deadline = Instant::now() + eta + RUN_GRACE;
    let final_state = loop {
        kernel.tick();
        let state = kernel.store.state();
        if state.run_status.is_terminal() {
            break state;
        }
        if Instant::now() >= deadline {
            kernel.dispatch(AppCommand::CancelRun);
            kernel.tick();
            break kernel.store.state();
        }
        std::thread::sleep(Duration::from_millis(weft_config::TICK_INTERVAL_MS));
    };

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if matches!(format, OutputFormat::Text) {
        let outcome = match final_state.run_status {
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
            _ => "still pending",
        };
        println!(
            ":: Run {} — {} events, focus {}",
            outcome,
            final_state.log.len(),
            final_state.focus.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

pub fn cmd_spec(text: &str) -> anyhow::Result<()> {
    let resolver = DemoIntentResolver::new();
    let spec = resolver.resolve(text)?;
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}
