use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftclock
/// CLI simulator for the mobile time-tracking prototype core
#[derive(Parser)]
#[command(
    name = "shiftclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Time-tracking prototype core: geofenced shift clock, per-task timers and end-of-shift allocation, driven as a scripted simulation",
    long_about = None
)]
pub struct Cli {
    /// Override config file path (useful for tests)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (no config file writes)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration values for problems")]
        check: bool,
    },

    /// List the task catalog
    Tasks,

    /// List the project catalog
    Projects,

    /// Run a scripted shift on a virtual clock and reconcile the allocation
    Simulate {
        /// Project to clock in at (default: first in the catalog)
        #[arg(long)]
        project: Option<u32>,

        /// App variant to simulate: v1, v2, v3 or v4
        #[arg(long)]
        variant: Option<String>,

        /// Time acceleration: 1, 10, 100 or 1000
        #[arg(long)]
        multiplier: Option<i64>,

        /// Simulated distance from the site, in meters
        #[arg(long)]
        distance: Option<f64>,

        /// Geofence radius in meters
        #[arg(long)]
        radius: Option<f64>,

        /// Force the geofence check to pass (defaults from config)
        #[arg(long = "override-geofence", value_name = "BOOL")]
        override_geofence: Option<bool>,

        /// Simulate a denied/unavailable location provider
        #[arg(long = "no-location")]
        no_location: bool,

        /// Raw time to stay clocked in after the task script (e.g. 10s, 17m, 1h30m)
        #[arg(long, value_name = "DUR")]
        work: Option<String>,

        /// Run a task for a raw duration; repeat to switch tasks in order
        #[arg(long = "run-task", value_name = "ID=DUR")]
        run_task: Vec<String>,

        /// Walk off site after this much raw clocked-in time
        #[arg(long = "exit-site-after", value_name = "DUR")]
        exit_site_after: Option<String>,

        /// Post-shift allocation edit; repeatable
        #[arg(long = "allocate", value_name = "ID[.tracked|.manual]=DUR")]
        allocate: Vec<String>,

        /// Attach a note to a task's allocation (v3 only)
        #[arg(long = "note", value_name = "ID=TEXT")]
        note: Vec<String>,

        /// Answer the under-allocation prompt with "proceed"
        #[arg(long, short = 'y')]
        yes: bool,

        /// Report format for --out
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Write the shift report to FILE after reconciliation
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}
