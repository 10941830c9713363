use clap::{Parser, ValueEnum};
use pinhole_core::{Alphabet, CharClass, DEFAULT_LENGTH};
use std::fmt::{Display, Formatter};

pub const LENGTH_ENV: &str = "PINHOLE_LENGTH";
pub const ALPHABET_ENV: &str = "PINHOLE_ALPHABET";
pub const SYMBOLS_ENV: &str = "PINHOLE_SYMBOLS";
pub const FIRST_CHAR_ENV: &str = "PINHOLE_FIRST_CHAR";
pub const EXCLUDE_ENV: &str = "PINHOLE_EXCLUDE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlphabetArg {
    #[value(name = "slug")]
    Slug,
    #[value(name = "alphanumeric")]
    Alphanumeric,
    #[value(name = "url-safe")]
    UrlSafe,
}

impl AlphabetArg {
    pub fn alphabet(self) -> Alphabet {
        match self {
            AlphabetArg::Slug => Alphabet::slug(),
            AlphabetArg::Alphanumeric => Alphabet::alphanumeric(),
            AlphabetArg::UrlSafe => Alphabet::url_safe(),
        }
    }
}

impl Display for AlphabetArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlphabetArg::Slug => write!(f, "slug"),
            AlphabetArg::Alphanumeric => write!(f, "alphanumeric"),
            AlphabetArg::UrlSafe => write!(f, "url-safe"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CharClassArg {
    #[value(name = "alphabetic")]
    Alphabetic,
    #[value(name = "numeric")]
    Numeric,
    #[value(name = "lowercase")]
    Lowercase,
    #[value(name = "uppercase")]
    Uppercase,
}

impl From<CharClassArg> for CharClass {
    fn from(value: CharClassArg) -> Self {
        match value {
            CharClassArg::Alphabetic => CharClass::Alphabetic,
            CharClassArg::Numeric => CharClass::Numeric,
            CharClassArg::Lowercase => CharClass::Lowercase,
            CharClassArg::Uppercase => CharClass::Uppercase,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pinhole", about = "Generate random URL-safe identifiers")]
pub struct CLI {
    /// Number of symbols per identifier.
    #[arg(long, short = 'l', env = LENGTH_ENV, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Built-in alphabet to draw from.
    #[arg(
        long,
        short = 'a',
        env = ALPHABET_ENV,
        value_enum,
        default_value_t = AlphabetArg::Slug
    )]
    pub alphabet: AlphabetArg,

    /// Custom alphabet; overrides `--alphabet`.
    #[arg(long, env = SYMBOLS_ENV)]
    pub symbols: Option<String>,

    /// Number of identifiers to print.
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,

    /// Required class of the first character.
    #[arg(long, env = FIRST_CHAR_ENV, value_enum)]
    pub first_char: Option<CharClassArg>,

    /// Characters that must not appear in the output.
    #[arg(long, env = EXCLUDE_ENV, default_value = "")]
    pub exclude: String,
}
