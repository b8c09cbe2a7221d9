//! Demo binary: present a sample crash report and deliver it to a file

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crash_reporter::{CrashReporter, DismissalResult, FileRecipient};

const SAMPLE_REPORT: &str = "\
Process:       demo [4242]
Exception:     EXC_BAD_ACCESS (SIGSEGV)

Thread 0 Crashed:
0   demo        0x0000000100003f2c  frobnicate + 44
1   demo        0x0000000100003e80  main + 128
2   libc.so.6   0x00007f2a1c029d90  __libc_start_call_main + 128";

#[derive(Parser)]
#[command(name = "crash-reporter", version, about = "Present a crash report dialog in the terminal")]
struct Args {
    /// File containing the report body; a sample report is used when omitted
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// File submitted reports are appended to
    #[arg(short, long, default_value = "crash-reports.log")]
    output: PathBuf,

    /// Alert message shown at the top of the dialog
    #[arg(short, long, default_value = "The application quit unexpectedly.")]
    message: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let report = match &args.report {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE_REPORT.to_string(),
    };

    let mut reporter = CrashReporter::with_recipient(
        Box::new(FileRecipient::new(&args.output)),
        &args.message,
        "Click Submit Report to send the report to %s, or Cancel to discard it.",
        &[args.output.display().to_string().into()],
    )?;
    reporter.set_report(report)?;

    match reporter.run_modal_if_needed()? {
        Some(DismissalResult::Submitted) => {
            if let Some(err) = reporter.take_delivery_error() {
                eprintln!("report could not be delivered: {err}");
                std::process::exit(1);
            }
            println!("report submitted to {}", args.output.display());
        }
        Some(DismissalResult::Cancelled) => println!("report discarded"),
        None => println!("nothing to report"),
    }

    Ok(())
}
