//! Builders for the short-form payload strings scanners recognise.
//!
//! Each builder trims its fields, rejects empty required fields with
//! [`PayloadError::MissingField`], and returns the text to pass to
//! [`crate::encode`]. Query components are percent-encoded with the same
//! unreserved set as JavaScript's `encodeURIComponent`.

use chrono::NaiveDateTime;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::error::PayloadError;

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, PayloadError> {
    let value = value.trim();
    if value.is_empty() {
        Err(PayloadError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Join `name=value` pairs onto `base` as a query string.
fn with_query(mut base: String, params: &[(&str, String)]) -> String {
    for (i, (name, value)) in params.iter().enumerate() {
        base.push(if i == 0 { '?' } else { '&' });
        base.push_str(name);
        base.push('=');
        base.push_str(value);
    }
    base
}

/// Prefix `https://` when the input has no http(s) scheme, then check it parses.
pub fn url(input: &str) -> Result<String, PayloadError> {
    let input = required(input, "url")?;
    let normalized = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };
    Url::parse(&normalized)?;
    Ok(normalized)
}

/// `tel:` URI
pub fn tel(phone: &str) -> Result<String, PayloadError> {
    Ok(format!("tel:{}", required(phone, "phone")?))
}

/// `smsto:phone[:message]`
pub fn sms(phone: &str, message: Option<&str>) -> Result<String, PayloadError> {
    let phone = required(phone, "phone")?;
    Ok(match optional(message) {
        Some(message) => format!("smsto:{phone}:{message}"),
        None => format!("smsto:{phone}"),
    })
}

/// `mailto:` URI with optional subject and body
pub fn email(to: &str, subject: Option<&str>, body: Option<&str>) -> Result<String, PayloadError> {
    let to = required(to, "to")?;
    let mut params = Vec::new();
    if let Some(subject) = optional(subject) {
        params.push(("subject", encode_component(subject)));
    }
    if let Some(body) = optional(body) {
        params.push(("body", encode_component(body)));
    }
    Ok(with_query(format!("mailto:{to}"), &params))
}

/// `geo:lat,lng[?q=name]`
pub fn geo(latitude: f64, longitude: f64, name: Option<&str>) -> Result<String, PayloadError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(PayloadError::OutOfRange {
            field: "latitude",
            value: latitude,
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(PayloadError::OutOfRange {
            field: "longitude",
            value: longitude,
        });
    }
    let params: Vec<_> = optional(name)
        .map(|name| ("q", encode_component(name)))
        .into_iter()
        .collect();
    Ok(with_query(format!("geo:{latitude},{longitude}"), &params))
}

/// Wi-Fi network authentication type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WifiSecurity {
    /// WPA/WPA2 personal
    #[default]
    Wpa,
    /// Legacy WEP
    Wep,
    /// Open network
    NoPass,
}

impl WifiSecurity {
    fn as_str(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }
}

/// Network credentials in the `WIFI:` format
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WifiNetwork {
    /// Network name
    pub ssid: String,
    /// Ignored for open networks
    pub password: Option<String>,
    /// Authentication type
    pub security: WifiSecurity,
    /// Network does not broadcast its SSID
    pub hidden: bool,
}

impl WifiNetwork {
    /// Backslash-escape `\ " ; , :`
    fn escape(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            if matches!(c, '\\' | '"' | ';' | ',' | ':') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    /// `WIFI:T:..;S:..;P:..;H:..;;`
    pub fn to_payload(&self) -> Result<String, PayloadError> {
        let ssid = required(&self.ssid, "ssid")?;
        let mut payload = format!(
            "WIFI:T:{};S:{};",
            self.security.as_str(),
            Self::escape(ssid)
        );
        if self.security != WifiSecurity::NoPass {
            if let Some(password) = optional(self.password.as_deref()) {
                payload.push_str(&format!("P:{};", Self::escape(password)));
            }
        }
        payload.push_str(&format!("H:{};;", self.hidden));
        Ok(payload)
    }
}

/// Contact card rendered as vCard 3.0 with CRLF line endings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    /// Full name; the last word becomes the family name
    pub name: String,
    /// Mobile number; characters other than digits, `+ - ( )` and spaces are dropped
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Company or organisation
    pub organization: Option<String>,
    /// Free-form home address
    pub address: Option<String>,
}

impl Contact {
    fn clean_phone(phone: &str) -> String {
        phone
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')') || c.is_whitespace())
            .collect()
    }

    /// Render the card; only `name` is required.
    pub fn to_vcard(&self) -> Result<String, PayloadError> {
        let name = required(&self.name, "name")?;
        let (first, last) = match name.rsplit_once(' ') {
            Some((first, last)) => (first, last),
            None => (name, ""),
        };

        let mut lines = vec![
            "BEGIN:VCARD".to_string(),
            "VERSION:3.0".to_string(),
            format!("FN:{name}"),
            format!("N:{last};{first};;;"),
        ];
        if let Some(phone) = optional(self.phone.as_deref()) {
            lines.push(format!("TEL;TYPE=CELL:{}", Self::clean_phone(phone)));
        }
        if let Some(email) = optional(self.email.as_deref()) {
            lines.push(format!("EMAIL;TYPE=INTERNET:{email}"));
        }
        if let Some(org) = optional(self.organization.as_deref()) {
            lines.push(format!("ORG:{org}"));
        }
        if let Some(address) = optional(self.address.as_deref()) {
            lines.push(format!("ADR;TYPE=HOME:;;{address};;;;"));
        }
        lines.push("END:VCARD".to_string());

        let mut vcard = lines.join("\r\n");
        vcard.push_str("\r\n");
        Ok(vcard)
    }
}

/// UPI payment request (`upi://pay`), currency INR
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpiPayment {
    /// Payee virtual payment address, e.g. `name@bank`
    pub payee_address: String,
    /// Payee display name
    pub payee_name: Option<String>,
    /// Amount in rupees
    pub amount: Option<f64>,
    /// Transaction note
    pub note: Option<String>,
}

impl UpiPayment {
    /// `upi://pay?pa=..&pn=..&am=..&tn=..&cu=INR`
    pub fn to_payload(&self) -> Result<String, PayloadError> {
        let address = required(&self.payee_address, "payee_address")?;
        let mut params = vec![("pa", encode_component(address))];
        if let Some(name) = optional(self.payee_name.as_deref()) {
            params.push(("pn", encode_component(name)));
        }
        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(PayloadError::OutOfRange {
                    field: "amount",
                    value: amount,
                });
            }
            params.push(("am", format!("{amount:.2}")));
        }
        if let Some(note) = optional(self.note.as_deref()) {
            params.push(("tn", encode_component(note)));
        }
        params.push(("cu", "INR".to_string()));
        Ok(with_query("upi://pay".to_string(), &params))
    }
}

/// Social network a profile link points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    /// instagram.com
    Instagram,
    /// facebook.com
    Facebook,
    /// x.com
    Twitter,
    /// linkedin.com; full profile URLs are kept as given
    LinkedIn,
    /// youtube.com; full URLs are kept as given
    YouTube,
    /// threads.net
    Threads,
    /// snapchat.com
    Snapchat,
    /// tiktok.com
    TikTok,
    /// wa.me, handle is the phone number
    WhatsApp,
    /// t.me
    Telegram,
    /// Any other site, given as a URL or host
    Other,
}

/// Profile URL for `handle` on `platform`.
///
/// Handles for the fixed-host platforms lose any `@` and whitespace.
pub fn social(platform: SocialPlatform, handle: &str) -> Result<String, PayloadError> {
    let input = required(handle, "handle")?;
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '@' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(PayloadError::MissingField("handle"));
    }

    let link = match platform {
        SocialPlatform::Instagram => format!("https://instagram.com/{cleaned}"),
        SocialPlatform::Facebook => format!("https://facebook.com/{cleaned}"),
        SocialPlatform::Twitter => format!("https://x.com/{cleaned}"),
        SocialPlatform::Threads => format!("https://www.threads.net/@{cleaned}"),
        SocialPlatform::Snapchat => format!("https://www.snapchat.com/add/{cleaned}"),
        SocialPlatform::TikTok => format!("https://www.tiktok.com/@{cleaned}"),
        SocialPlatform::WhatsApp => format!("https://wa.me/{cleaned}"),
        SocialPlatform::Telegram => format!("https://t.me/{cleaned}"),
        SocialPlatform::LinkedIn if input.contains("linkedin.com") => input.to_string(),
        SocialPlatform::LinkedIn => format!("https://linkedin.com/{input}"),
        SocialPlatform::YouTube if input.starts_with("http") => input.to_string(),
        SocialPlatform::YouTube => format!("https://youtube.com/{input}"),
        SocialPlatform::Other => return url(input),
    };
    Url::parse(&link)?;
    Ok(link)
}

/// Cryptocurrency for a payment URI; stablecoins use the Ethereum scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoCoin {
    /// BTC
    Bitcoin,
    /// ETH
    Ethereum,
    /// LTC
    Litecoin,
    /// DOGE
    Dogecoin,
    /// XRP
    Ripple,
    /// ADA
    Cardano,
    /// SOL
    Solana,
    /// MATIC
    Polygon,
    /// Tether, ERC-20
    Usdt,
    /// USD Coin, ERC-20
    Usdc,
}

impl CryptoCoin {
    /// URI scheme (BIP-21 style `scheme:address`)
    pub fn scheme(self) -> &'static str {
        match self {
            CryptoCoin::Bitcoin => "bitcoin",
            CryptoCoin::Ethereum | CryptoCoin::Usdt | CryptoCoin::Usdc => "ethereum",
            CryptoCoin::Litecoin => "litecoin",
            CryptoCoin::Dogecoin => "dogecoin",
            CryptoCoin::Ripple => "ripple",
            CryptoCoin::Cardano => "cardano",
            CryptoCoin::Solana => "solana",
            CryptoCoin::Polygon => "polygon",
        }
    }
}

/// Payment request `scheme:address[?amount=..&label=..]`
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoPayment {
    /// Coin, selects the URI scheme
    pub coin: CryptoCoin,
    /// Receiving address
    pub address: String,
    /// Amount in whole coins
    pub amount: Option<f64>,
    /// Payee label
    pub label: Option<String>,
}

impl CryptoPayment {
    /// Render the payment URI.
    pub fn to_payload(&self) -> Result<String, PayloadError> {
        let address = required(&self.address, "address")?;
        let mut params = Vec::new();
        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(PayloadError::OutOfRange {
                    field: "amount",
                    value: amount,
                });
            }
            params.push(("amount", amount.to_string()));
        }
        if let Some(label) = optional(self.label.as_deref()) {
            params.push(("label", encode_component(label)));
        }
        Ok(with_query(
            format!("{}:{address}", self.coin.scheme()),
            &params,
        ))
    }
}

/// Calendar entry rendered as an iCalendar `VEVENT` (floating local time)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title
    pub title: String,
    /// Start, local time
    pub start: NaiveDateTime,
    /// End, local time; not before `start`
    pub end: NaiveDateTime,
    /// Venue
    pub location: Option<String>,
    /// Free-form notes
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Parse `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`.
    pub fn parse_time(value: &str) -> Result<NaiveDateTime, PayloadError> {
        let value = value.trim();
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
            .map_err(PayloadError::from)
    }

    /// Escape text values: backslash, `;`, `,` and newlines
    fn escape(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '\\' | ';' | ',' => {
                    out.push('\\');
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\r' => {}
                _ => out.push(c),
            }
        }
        out
    }

    /// Render a `VCALENDAR` wrapping one `VEVENT`.
    pub fn to_ical(&self) -> Result<String, PayloadError> {
        let title = required(&self.title, "title")?;
        if self.end < self.start {
            return Err(PayloadError::EndBeforeStart);
        }
        const STAMP: &str = "%Y%m%dT%H%M%S";

        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("DTSTART:{}", self.start.format(STAMP)),
            format!("DTEND:{}", self.end.format(STAMP)),
            format!("SUMMARY:{}", Self::escape(title)),
        ];
        if let Some(location) = optional(self.location.as_deref()) {
            lines.push(format!("LOCATION:{}", Self::escape(location)));
        }
        if let Some(description) = optional(self.description.as_deref()) {
            lines.push(format!("DESCRIPTION:{}", Self::escape(description)));
        }
        lines.push("END:VEVENT".to_string());
        lines.push("END:VCALENDAR".to_string());
        Ok(lines.join("\r\n"))
    }
}

/// Routing code for a bank transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankRouting {
    /// Domestic Indian transfer by IFSC
    Ifsc(String),
    /// International transfer by SWIFT/BIC
    Swift(String),
}

/// Plain-text bank transfer details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTransfer {
    /// Account holder
    pub beneficiary: String,
    /// Account number or IBAN
    pub account: String,
    /// IFSC or SWIFT code; upper-cased on output
    pub routing: BankRouting,
    /// Bank name; upper-cased on output
    pub bank_name: Option<String>,
    /// Amount as entered
    pub amount: Option<String>,
}

impl BankTransfer {
    /// Newline-separated `Label: value` lines.
    pub fn to_payload(&self) -> Result<String, PayloadError> {
        let beneficiary = required(&self.beneficiary, "beneficiary")?;
        let account = required(&self.account, "account")?;
        let (heading, routing, currency) = match &self.routing {
            BankRouting::Ifsc(code) => ("Bank Transfer", format!("IFSC: {}", code.trim().to_uppercase()), "₹"),
            BankRouting::Swift(code) => (
                "International Transfer",
                format!("SWIFT/BIC: {}", code.trim().to_uppercase()),
                "",
            ),
        };

        let mut lines = vec![
            heading.to_string(),
            format!("Beneficiary: {beneficiary}"),
            format!("Account: {account}"),
            routing,
        ];
        if let Some(bank) = optional(self.bank_name.as_deref()) {
            lines.push(format!("Bank: {}", bank.to_uppercase()));
        }
        if let Some(amount) = optional(self.amount.as_deref()) {
            lines.push(format!("Amount: {currency}{amount}"));
        }
        Ok(lines.join("\n"))
    }
}
