//! The `gogen` command line tool.
//!
//! Generates cryptographic keys and random passwords, hashes and verifies
//! passwords with bcrypt or Argon2id, and benchmarks bcrypt cost factors.

use std::io::{self, IsTerminal, Read, Write};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use gogen::benchmark::{benchmark_costs, stream_table};
use gogen::hash::{self, bcrypt, Algorithm};
use gogen::password::MIN_LENGTH_ALL_CLASSES;
use gogen::{generate_key, generate_password, verify_password, Rule, Validator};

// ── Validation rules ──────────────────────────────────────────────────────────

const KEY_LENGTH_RULES: [Rule; 3] = [Rule::Min(32), Rule::Max(512), Rule::MultipleOf(4)];
const COST_RULES: [Rule; 2] = [
    Rule::Min(bcrypt::MIN_COST as i64),
    Rule::Max(bcrypt::MAX_COST as i64),
];

// ── CLI structure ─────────────────────────────────────────────────────────────

/// Generate cryptographic keys, passwords and password hashes.
#[derive(Parser, Debug)]
#[command(
    name = "gogen",
    about = "Generate cryptographic keys, passwords and password hashes",
    version,
    long_about = "Generate cryptographic keys, passwords and password hashes.\n\nEvery flag can also be set through a GOGEN_-prefixed environment variable,\ne.g. GOGEN_LENGTH=64 or GOGEN_COST=14."
)]
struct Cli {
    /// Show the configuration and exit
    #[arg(short, long, global = true, env = "GOGEN_SHOW")]
    show: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a cryptographic key, printed as hex
    Key {
        /// Length of the key in bytes (32-512, multiple of 4)
        #[arg(short, long, default_value_t = 32, env = "GOGEN_LENGTH")]
        length: i64,
    },

    /// Generate a random password
    #[command(visible_alias = "pw")]
    Password {
        /// Length of the password in characters
        #[arg(short, long, default_value_t = 16, env = "GOGEN_LENGTH")]
        length: i64,

        /// Do not require a lowercase, uppercase, digit and symbol
        #[arg(long, env = "GOGEN_NO_REQUIRE_ALL")]
        no_require_all: bool,
    },

    /// Hash a password (read from stdin when not given)
    Hash {
        /// Hashing algorithm (bcrypt or argon2id)
        #[arg(short, long, default_value = "bcrypt", env = "GOGEN_ALGORITHM")]
        algorithm: Algorithm,

        /// Cost of the bcrypt hash (4-31, default 12)
        #[arg(short, long, env = "GOGEN_COST")]
        cost: Option<i64>,

        /// Print hash+verify timings for a range of bcrypt costs instead
        #[arg(short, long, env = "GOGEN_BENCHMARK")]
        benchmark: bool,

        /// Lowest cost to benchmark
        #[arg(long, default_value_t = bcrypt::MIN_COST as i64, env = "GOGEN_MIN_COST")]
        min_cost: i64,

        /// Highest cost to benchmark
        #[arg(long, default_value_t = bcrypt::MAX_COST as i64, env = "GOGEN_MAX_COST")]
        max_cost: i64,

        /// Password to hash
        password: Option<String>,
    },

    /// Verify a password against a bcrypt or Argon2id hash
    Verify {
        /// Hash to verify against
        hash: String,

        /// Password to verify (read from stdin when not given)
        password: Option<String>,
    },
}

// ── Configuration display ─────────────────────────────────────────────────────

/// Resolved settings, printed by `--show`. The password is always masked.
#[derive(Serialize, Debug, Default)]
struct Settings {
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    require_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm: Option<Algorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}

fn show_settings(settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("failed to serialize settings")?;
    println!("{json}");
    Ok(())
}

// ── Input/output helpers ──────────────────────────────────────────────────────

/// Take the password from the argument if present, else from piped stdin.
fn password_from_arg_or_stdin(arg: Option<String>) -> Result<String> {
    let stdin = io::stdin();
    let piped = !stdin.is_terminal();

    match arg {
        Some(password) => {
            if piped {
                eprintln!("warning: reading password from argument, ignoring stdin");
            }
            Ok(password)
        }
        None if piped => {
            let mut input = String::new();
            stdin
                .lock()
                .read_to_string(&mut input)
                .context("reading password from stdin")?;
            let trimmed = input.strip_suffix('\n').unwrap_or(&input);
            let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
            Ok(trimmed.to_string())
        }
        None => Ok(String::new()),
    }
}

/// Print `text` to stdout with no trailing newline.
fn emit(text: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .context("failed to write to stdout")
}

fn to_usize(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| anyhow!("{field} {value} is out of range"))
}

fn to_u32(field: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} {value} is out of range"))
}

// ── Main entry point ──────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let show = cli.show;
    let result = match cli.command {
        Commands::Key { length } => cmd_key(length, show),
        Commands::Password {
            length,
            no_require_all,
        } => cmd_password(length, !no_require_all, show),
        Commands::Hash {
            algorithm,
            cost,
            benchmark,
            min_cost,
            max_cost,
            password,
        } => password_from_arg_or_stdin(password).and_then(|password| {
            cmd_hash(
                &password,
                algorithm,
                cost,
                benchmark.then_some((min_cost, max_cost)),
                show,
            )
        }),
        Commands::Verify {
            hash: record,
            password,
        } => password_from_arg_or_stdin(password)
            .and_then(|password| cmd_verify(&record, &password, show)),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `gogen key [--length N]`
fn cmd_key(length: i64, show: bool) -> Result<()> {
    if show {
        return show_settings(&Settings {
            command: "key",
            length: Some(length),
            ..Settings::default()
        });
    }

    let mut validator = Validator::new();
    validator.int("Length", length, &KEY_LENGTH_RULES);
    validator.finish()?;

    let key = generate_key(to_usize("Length", length)?).context("generating key")?;
    emit(&key.to_hex())
}

/// `gogen password [--length N] [--no-require-all]`
fn cmd_password(length: i64, require_all: bool, show: bool) -> Result<()> {
    if show {
        return show_settings(&Settings {
            command: "password",
            length: Some(length),
            require_all: Some(require_all),
            ..Settings::default()
        });
    }

    let min = if require_all {
        MIN_LENGTH_ALL_CLASSES as i64
    } else {
        1
    };
    let mut validator = Validator::new();
    validator.int("Length", length, &[Rule::Min(min)]);
    validator.finish()?;

    let password =
        generate_password(to_usize("Length", length)?, require_all).context("generating password")?;
    emit(&password)
}

/// `gogen hash [--algorithm ALG] [--cost N] [--benchmark] [PASSWORD]`
fn cmd_hash(
    password: &str,
    algorithm: Algorithm,
    cost: Option<i64>,
    benchmark: Option<(i64, i64)>,
    show: bool,
) -> Result<()> {
    if show {
        return show_settings(&Settings {
            command: "hash",
            algorithm: Some(algorithm),
            cost,
            benchmark: Some(benchmark.is_some()),
            min_cost: benchmark.map(|(min, _)| min),
            max_cost: benchmark.map(|(_, max)| max),
            password: Some(mask(password)),
            ..Settings::default()
        });
    }

    let mut validator = Validator::new();
    validator.required("Password", password);
    if let Some(cost) = cost {
        validator.int("Cost", cost, &COST_RULES);
    }
    if let Some((min, max)) = benchmark {
        validator
            .int("MinCost", min, &COST_RULES)
            .int("MaxCost", max, &COST_RULES);
        if min > max {
            validator.reject("MinCost", "must not exceed MaxCost");
        }
    }
    validator.finish()?;

    let cost = cost.map(|c| to_u32("Cost", c)).transpose()?;

    if let Some((min, max)) = benchmark {
        algorithm.ensure_tunable("benchmarking")?;
        let sweep = benchmark_costs(password, to_u32("MinCost", min)?, to_u32("MaxCost", max)?);
        stream_table(&mut io::stdout().lock(), sweep).context("writing benchmark table")?;
        return Ok(());
    }

    let record = hash::hash(password, algorithm, cost).context("generating hash")?;
    emit(&record)
}

/// `gogen verify HASH [PASSWORD]`
fn cmd_verify(record: &str, password: &str, show: bool) -> Result<()> {
    if show {
        let record = record.trim();
        let algorithm = Algorithm::detect(record).ok();
        let cost = match algorithm {
            Some(Algorithm::Bcrypt) => bcrypt::record_cost(record).ok().map(i64::from),
            _ => None,
        };
        return show_settings(&Settings {
            command: "verify",
            algorithm,
            cost,
            hash: Some(record.to_string()),
            password: Some(mask(password)),
            ..Settings::default()
        });
    }

    let mut validator = Validator::new();
    validator
        .required("Hash", record.trim())
        .required("Password", password);
    validator.finish()?;

    if verify_password(password, record.trim()).context("verifying hash")? {
        emit("valid")
    } else {
        Err(anyhow!("password does not match hash"))
    }
}
