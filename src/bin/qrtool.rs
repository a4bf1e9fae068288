use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use qr_forge::payload::{
    self, BankRouting, BankTransfer, CalendarEvent, Contact, CryptoCoin, CryptoPayment,
    SocialPlatform, UpiPayment, WifiNetwork, WifiSecurity,
};
use qr_forge::{ECLevel, EncodeOptions, MaskPattern, QrCode, decode_matrix, encode_with_options};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code encoder CLI")]
struct Cli {
    #[command(flatten)]
    symbol: SymbolArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SymbolArgs {
    /// Error correction level (L, M, Q, H)
    #[arg(long, short, global = true, default_value = "M")]
    level: ECLevel,
    /// Largest version to try (1-40)
    #[arg(long, global = true, default_value_t = 10)]
    max_version: u8,
    /// Force a mask pattern (0-7) instead of scoring all eight
    #[arg(long, global = true)]
    mask: Option<u8>,
    /// Raise the EC level when the chosen version has room
    #[arg(long, global = true)]
    boost: bool,
    /// Quiet zone width in modules
    #[arg(long, global = true, default_value_t = 4)]
    quiet_zone: usize,
    /// Read the symbol back and check it matches the input
    #[arg(long, global = true)]
    verify: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Encode raw text
    Encode { text: String },
    /// Encode a web link (https:// is added when missing)
    Url { url: String },
    /// Encode Wi-Fi credentials
    Wifi {
        #[arg(long)]
        ssid: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, value_enum, default_value_t = Security::Wpa)]
        security: Security,
        #[arg(long)]
        hidden: bool,
    },
    /// Encode a map location
    Geo {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        name: Option<String>,
    },
    /// Encode a vCard 3.0 contact
    Vcard {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        org: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Encode a UPI payment request
    Upi {
        #[arg(long)]
        pa: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Encode a social profile link
    Social {
        #[arg(value_enum)]
        platform: Platform,
        handle: String,
    },
    /// Encode a cryptocurrency payment request
    Crypto {
        #[arg(value_enum)]
        coin: Coin,
        address: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        label: Option<String>,
    },
    /// Encode a calendar event (times as YYYY-MM-DD HH:MM)
    Event {
        #[arg(long)]
        title: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Encode bank transfer details (give --ifsc or --swift)
    Bank {
        #[arg(long)]
        beneficiary: String,
        #[arg(long)]
        account: String,
        #[arg(long, conflicts_with = "swift", required_unless_present = "swift")]
        ifsc: Option<String>,
        #[arg(long)]
        swift: Option<String>,
        #[arg(long)]
        bank: Option<String>,
        #[arg(long)]
        amount: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Platform {
    Instagram,
    Facebook,
    Twitter,
    Linkedin,
    Youtube,
    Threads,
    Snapchat,
    Tiktok,
    Whatsapp,
    Telegram,
    Other,
}

impl From<Platform> for SocialPlatform {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Instagram => SocialPlatform::Instagram,
            Platform::Facebook => SocialPlatform::Facebook,
            Platform::Twitter => SocialPlatform::Twitter,
            Platform::Linkedin => SocialPlatform::LinkedIn,
            Platform::Youtube => SocialPlatform::YouTube,
            Platform::Threads => SocialPlatform::Threads,
            Platform::Snapchat => SocialPlatform::Snapchat,
            Platform::Tiktok => SocialPlatform::TikTok,
            Platform::Whatsapp => SocialPlatform::WhatsApp,
            Platform::Telegram => SocialPlatform::Telegram,
            Platform::Other => SocialPlatform::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Coin {
    Bitcoin,
    Ethereum,
    Litecoin,
    Dogecoin,
    Ripple,
    Cardano,
    Solana,
    Polygon,
    Usdt,
    Usdc,
}

impl From<Coin> for CryptoCoin {
    fn from(coin: Coin) -> Self {
        match coin {
            Coin::Bitcoin => CryptoCoin::Bitcoin,
            Coin::Ethereum => CryptoCoin::Ethereum,
            Coin::Litecoin => CryptoCoin::Litecoin,
            Coin::Dogecoin => CryptoCoin::Dogecoin,
            Coin::Ripple => CryptoCoin::Ripple,
            Coin::Cardano => CryptoCoin::Cardano,
            Coin::Solana => CryptoCoin::Solana,
            Coin::Polygon => CryptoCoin::Polygon,
            Coin::Usdt => CryptoCoin::Usdt,
            Coin::Usdc => CryptoCoin::Usdc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Security {
    Wpa,
    Wep,
    Nopass,
}

impl From<Security> for WifiSecurity {
    fn from(security: Security) -> Self {
        match security {
            Security::Wpa => WifiSecurity::Wpa,
            Security::Wep => WifiSecurity::Wep,
            Security::Nopass => WifiSecurity::NoPass,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let text = match build_payload(cli.command) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Invalid payload: {err}");
            return ExitCode::FAILURE;
        }
    };

    match encode_cmd(&text, &cli.symbol) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn build_payload(command: Command) -> Result<String, qr_forge::PayloadError> {
    match command {
        Command::Encode { text } => Ok(text),
        Command::Url { url } => payload::url(&url),
        Command::Wifi {
            ssid,
            password,
            security,
            hidden,
        } => WifiNetwork {
            ssid,
            password,
            security: security.into(),
            hidden,
        }
        .to_payload(),
        Command::Geo { lat, lng, name } => payload::geo(lat, lng, name.as_deref()),
        Command::Vcard {
            name,
            phone,
            email,
            org,
            address,
        } => Contact {
            name,
            phone,
            email,
            organization: org,
            address,
        }
        .to_vcard(),
        Command::Upi {
            pa,
            name,
            amount,
            note,
        } => UpiPayment {
            payee_address: pa,
            payee_name: name,
            amount,
            note,
        }
        .to_payload(),
        Command::Social { platform, handle } => payload::social(platform.into(), &handle),
        Command::Crypto {
            coin,
            address,
            amount,
            label,
        } => CryptoPayment {
            coin: coin.into(),
            address,
            amount,
            label,
        }
        .to_payload(),
        Command::Event {
            title,
            start,
            end,
            location,
            description,
        } => CalendarEvent {
            title,
            start: CalendarEvent::parse_time(&start)?,
            end: CalendarEvent::parse_time(&end)?,
            location,
            description,
        }
        .to_ical(),
        Command::Bank {
            beneficiary,
            account,
            ifsc,
            swift,
            bank,
            amount,
        } => {
            let routing = match (ifsc, swift) {
                (Some(ifsc), _) => BankRouting::Ifsc(ifsc),
                (None, Some(swift)) => BankRouting::Swift(swift),
                (None, None) => return Err(qr_forge::PayloadError::MissingField("ifsc")),
            };
            BankTransfer {
                beneficiary,
                account,
                routing,
                bank_name: bank,
                amount,
            }
            .to_payload()
        }
    }
}

fn encode_cmd(text: &str, args: &SymbolArgs) -> Result<(), String> {
    let mut options = EncodeOptions::new(args.level)
        .with_max_version(args.max_version)
        .with_boost_error_correction(args.boost);
    if let Some(id) = args.mask {
        let mask = MaskPattern::from_bits(id).ok_or_else(|| format!("Invalid mask {id}"))?;
        options = options.with_mask(mask);
    }

    let qr = encode_with_options(text, &options).map_err(|err| format!("Encode failed: {err}"))?;
    print_symbol(&qr, args.quiet_zone);

    if args.verify {
        let decoded = decode_matrix(qr.modules()).map_err(|err| format!("Verify failed: {err}"))?;
        if decoded.data != text.as_bytes() {
            return Err("Verify failed: decoded data differs from input".to_string());
        }
        println!("Verified: {} bytes read back", decoded.data.len());
    }
    Ok(())
}

fn print_symbol(qr: &QrCode, quiet_zone: usize) {
    println!(
        "Version {} ({}x{}), level {}, mode {}, mask {}",
        qr.version(),
        qr.size(),
        qr.size(),
        qr.error_correction(),
        qr.mode(),
        qr.mask_pattern().id()
    );
    print!("{}", qr.to_text("██", "  ", quiet_zone));
}
