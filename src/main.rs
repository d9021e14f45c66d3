//! `seccw` command-line front end

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use seccw_lib::commands::analyze::{analyze_batch, AnalysisMode};
use seccw_lib::commands::encode::{run_encode, MessageMode};
use seccw_lib::commands::keys::{
    decrypt_text, keygen, KeyPaths, DEFAULT_PRIVATE_KEY_FILE, DEFAULT_PUBLIC_KEY_FILE,
};
use seccw_lib::crypto::envelope;
use seccw_lib::domain::{Configuration, ModulationKind};

#[derive(Debug, Parser)]
#[command(name = "seccw", version, about = "Post-quantum encrypted Morse keying to CS8")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a Kyber-512 keypair as base64 key files.
    Keygen {
        #[arg(long, default_value = DEFAULT_PUBLIC_KEY_FILE)]
        public: PathBuf,
        #[arg(long, default_value = DEFAULT_PRIVATE_KEY_FILE)]
        private: PathBuf,
    },

    /// Key a message into a CS8 capture.
    Encode {
        /// Message text (or base64 envelope with --mode cipher-b64).
        #[arg(long)]
        message: String,

        /// Output .cs8 file.
        #[arg(long)]
        output: PathBuf,

        /// plaintext, encrypt or cipher-b64.
        #[arg(long, default_value = "encrypt")]
        mode: MessageMode,

        /// AM or FM (overrides the profile).
        #[arg(long)]
        modulation: Option<ModulationKind>,

        /// JSON configuration profile.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = DEFAULT_PUBLIC_KEY_FILE)]
        public: PathBuf,
        #[arg(long, default_value = DEFAULT_PRIVATE_KEY_FILE)]
        private: PathBuf,
    },

    /// Decrypt a compressed base64 envelope.
    Decrypt {
        #[arg(long)]
        cipher_b64: String,
        #[arg(long, default_value = DEFAULT_PRIVATE_KEY_FILE)]
        private: PathBuf,
    },

    /// Analyze one or more CS8 captures.
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// amplitude, fft, iq or all.
        #[arg(long, default_value = "amplitude")]
        mode: AnalysisMode,

        /// Sample rate in Hz (overrides the profile).
        #[arg(long)]
        sampling_rate: Option<f64>,

        /// Max number of samples used for the FFT (overrides the profile).
        #[arg(long)]
        max_fft_samples: Option<usize>,

        /// Export decimated series as JSON into this directory.
        #[arg(long)]
        save: Option<PathBuf>,

        /// JSON configuration profile.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_profile(path: Option<&PathBuf>) -> Result<Configuration> {
    match path {
        Some(path) => Configuration::load(path)
            .with_context(|| format!("load profile {}", path.display())),
        None => Ok(Configuration::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Keygen { public, private } => {
            keygen(&KeyPaths { public, private })?;
        }

        Command::Encode {
            message,
            output,
            mode,
            modulation,
            config,
            public,
            private,
        } => {
            let mut profile = load_profile(config.as_ref())?;
            if let Some(modulation) = modulation {
                profile.modem.modulation = modulation;
            }
            envelope::init();

            let report = run_encode(
                &message,
                mode,
                &output,
                &profile.modem,
                &KeyPaths { public, private },
            )
            .with_context(|| format!("encode to {}", output.display()))?;
            log::info!(
                "{} segments, {} units, {} samples",
                report.segment_count,
                report.total_units,
                report.sample_count
            );
        }

        Command::Decrypt { cipher_b64, private } => {
            envelope::init();
            let plain = decrypt_text(&cipher_b64, &private).context("decrypt")?;
            println!("{}", String::from_utf8_lossy(&plain));
        }

        Command::Analyze {
            files,
            mode,
            sampling_rate,
            max_fft_samples,
            save,
            config,
        } => {
            let mut profile = load_profile(config.as_ref())?;
            if let Some(rate) = sampling_rate {
                profile.analysis.sample_rate = rate;
            }
            if let Some(max) = max_fft_samples {
                profile.analysis.max_fft_samples = max;
            }
            if let Some(dir) = &save {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("create {}", dir.display()))?;
            }

            let batch = analyze_batch(&files, mode, &profile.analysis, save.as_deref());
            log::info!("Done");
            if !batch.failures.is_empty() {
                bail!("{} of {} captures failed", batch.failures.len(), files.len());
            }
        }
    }

    Ok(())
}
