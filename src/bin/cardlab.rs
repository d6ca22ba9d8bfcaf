//! CLI tool for generating and classifying test card numbers.
//!
//! # Usage
//!
//! ```bash
//! # Generate test cards
//! cardlab generate --type credit --count 5
//! cardlab generate --brand amex --output json
//!
//! # Classify a card number
//! cardlab validate 4111111111111111
//!
//! # Luhn check only
//! cardlab luhn 4111-1111-1111-1111
//!
//! # Detect brand
//! cardlab detect 5454545454545454 --length-aware
//!
//! # Mask a card number
//! cardlab mask 4111111111111111
//! ```

use cardlab::{
    detect_brand_with, mask, passes_luhn, validate, validate::clean_digits, CardBrand, CardCount,
    CardGenerator, LengthPolicy, ValidationOutcome,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cardlab")]
#[command(
    author,
    version,
    about = "Synthetic test card generator and card number classifier"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic test cards (for testing only)
    Generate {
        /// Card type label, e.g. credit or debit (informational)
        #[arg(short = 't', long = "type", default_value = "credit")]
        card_type: String,

        /// Number of cards to generate (clamped to 1-20)
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        count: String,

        /// Force a brand instead of picking one at random
        #[arg(short, long)]
        brand: Option<BrandArg>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Validate and classify a card number
    Validate {
        /// Card number (any non-digit characters are ignored)
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a card passes the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Detect card brand from number
    Detect {
        /// Card number (or partial number)
        card_number: String,

        /// Only accept a prefix match if the length fits the brand
        #[arg(short, long)]
        length_aware: bool,
    },

    /// Mask a card number, keeping the BIN and last four digits
    Mask {
        /// Card number to mask
        card_number: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum BrandArg {
    Amex,
    DinersClub,
    Discover,
    InstaPayment,
    Jcb,
    Maestro,
    Mastercard,
    Visa,
    VisaElectron,
}

impl From<BrandArg> for CardBrand {
    fn from(arg: BrandArg) -> Self {
        match arg {
            BrandArg::Amex => CardBrand::AmericanExpress,
            BrandArg::DinersClub => CardBrand::DinersClub,
            BrandArg::Discover => CardBrand::Discover,
            BrandArg::InstaPayment => CardBrand::InstaPayment,
            BrandArg::Jcb => CardBrand::Jcb,
            BrandArg::Maestro => CardBrand::Maestro,
            BrandArg::Mastercard => CardBrand::MasterCard,
            BrandArg::Visa => CardBrand::Visa,
            BrandArg::VisaElectron => CardBrand::VisaElectron,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            card_type,
            count,
            brand,
            output,
        } => cmd_generate(&card_type, &count, brand.map(Into::into), output),
        Commands::Validate {
            card_number,
            output,
        } => cmd_validate(&card_number, output),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Detect {
            card_number,
            length_aware,
        } => cmd_detect(&card_number, length_aware),
        Commands::Mask { card_number } => cmd_mask(&card_number),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn json_failed(e: serde_json::Error) -> ExitCode {
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}

fn cmd_generate(
    card_type: &str,
    count: &str,
    brand: Option<CardBrand>,
    output: OutputFormat,
) -> ExitCode {
    let envelope = CardGenerator::new(card_type)
        .maybe_brand(brand)
        .card_count(CardCount::parse(count))
        .generate();

    match output {
        OutputFormat::Json => match print_json(&envelope) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => json_failed(e),
        },
        OutputFormat::Text => {
            for card in &envelope.cards {
                println!(
                    "{:<16} {:<19} {:<4} {}  {}",
                    card.brand.name(),
                    card.number,
                    card.cvv,
                    card.expiry,
                    card.holder_name
                );
            }
            ExitCode::SUCCESS
        }
    }
}

fn cmd_validate(card_number: &str, output: OutputFormat) -> ExitCode {
    let outcome = validate(card_number);

    if let OutputFormat::Json = output {
        if let Err(e) = print_json(&outcome) {
            return json_failed(e);
        }
    } else {
        match &outcome {
            ValidationOutcome::NoDigits(report) => {
                println!("Valid: no");
                println!("Error: {}", report.message);
            }
            ValidationOutcome::Report(report) => {
                println!("Valid: {}", if report.success { "yes" } else { "no" });
                println!("Luhn Algorithm Check: {:?}", report.luhn);
                println!("Brand: {}", report.brand);
                println!("MII: {}", report.mii);
                println!("BIN/IIN: {}", report.bin);
                println!("PAN: {}", report.masked_number);
                println!("Checksum: {}", report.checksum_digit);
            }
        }
    }

    if outcome.luhn_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if passes_luhn(card_number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_detect(card_number: &str, length_aware: bool) -> ExitCode {
    let digits = clean_digits(card_number);
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }

    let policy = if length_aware {
        LengthPolicy::LengthAware
    } else {
        LengthPolicy::PrefixOnly
    };

    match detect_brand_with(&digits, policy) {
        Some(b) => {
            println!("Detected Brand: {}", b.name());
            println!("Valid Lengths: {:?}", b.rule().valid_lengths);
        }
        None => {
            println!("Detected Brand: Unknown");
        }
    }
    ExitCode::SUCCESS
}

fn cmd_mask(card_number: &str) -> ExitCode {
    let digits = clean_digits(card_number);
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }

    println!("{}", mask::mask_pan(&digits));
    ExitCode::SUCCESS
}
