use std::env;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Debug)]
pub struct Args {
    /// Force debug logging regardless of the config file
    pub debug: bool,
    /// Run exactly one scan pass and exit
    pub once: bool,
    /// Start enabled regardless of the config file
    pub start_enabled: bool,
    pub config_path: PathBuf,
    pub templates_dir: PathBuf,
}

impl Args {
    pub fn parse() -> Option<Self> {
        let args: Vec<String> = env::args().collect();

        let mut debug = false;
        let mut once = false;
        let mut start_enabled = false;
        let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        let mut templates_dir = PathBuf::from(".");

        for arg in args.iter().skip(1) {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!(
                    "autoclick v{} (build {})",
                    env!("APP_VERSION_DISPLAY"),
                    env!("APP_BUILD_YEAR")
                );
                return None;
            } else if arg == "--debug" {
                debug = true;
            } else if arg == "--once" {
                once = true;
            } else if arg == "--enabled" {
                start_enabled = true;
            } else if let Some(path) = arg.strip_prefix("--config=") {
                config_path = PathBuf::from(path);
            } else if let Some(dir) = arg.strip_prefix("--templates=") {
                templates_dir = PathBuf::from(dir);
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        Some(Args {
            debug,
            once,
            start_enabled,
            config_path,
            templates_dir,
        })
    }
}

fn print_help() {
    println!("🖱️ Autoclick - template-matching desktop auto-clicker");
    println!();
    println!("USAGE:");
    println!("    autoclick [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)          Run the detection loop with settings from {DEFAULT_CONFIG_FILE}");
    println!("    --once              Run a single scan pass, then exit");
    println!("    --enabled           Start enabled, overriding the config file");
    println!("    --debug             Enable debug logging of every triggered click");
    println!("    --config=FILE       Config file path (default: {DEFAULT_CONFIG_FILE})");
    println!("    --templates=DIR     Directory to scan for template images (default: .)");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    autoclick --enabled");
    println!("    autoclick --once --debug --templates=./buttons");
    println!("    autoclick --config=/etc/autoclick.ini");
}
