use clap::{Args, Subcommand, ValueEnum};
use remotebit_frame::{NumericFormat, ReceivedComponent, SendComponent};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod formats;
pub mod loopback;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode values into a frame and print it.
    Encode(EncodeArgs),
    /// Decode a hex frame with a given value format.
    Decode(DecodeArgs),
    /// List the numeric value formats.
    Formats(FormatsArgs),
    /// Send one frame across an in-process loopback link.
    Loopback(LoopbackArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Formats(args) => formats::run(args, format),
        Command::Loopback(args) => loopback::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Value format as spelled on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueFormat {
    #[value(name = "int8")]
    Int8,
    #[value(name = "uint8")]
    UInt8,
    #[value(name = "int16le")]
    Int16LE,
    #[value(name = "uint16le")]
    UInt16LE,
}

impl From<ValueFormat> for NumericFormat {
    fn from(format: ValueFormat) -> Self {
        match format {
            ValueFormat::Int8 => NumericFormat::Int8,
            ValueFormat::UInt8 => NumericFormat::UInt8,
            ValueFormat::Int16LE => NumericFormat::Int16LE,
            ValueFormat::UInt16LE => NumericFormat::UInt16LE,
        }
    }
}

/// Name of an outbound component tag, or `custom`.
pub fn send_component_name(tag: u8) -> &'static str {
    SendComponent::try_from(tag).map_or("custom", SendComponent::name)
}

/// Name of an inbound component tag, or `custom`.
pub fn received_component_name(tag: u8) -> &'static str {
    ReceivedComponent::try_from(tag).map_or("custom", ReceivedComponent::name)
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Component tag (100 = speed, 101 = distance).
    #[arg(long, short = 'c')]
    pub component: u8,
    /// Instance id.
    #[arg(long, short = 'i', default_value = "0")]
    pub id: u8,
    /// Numeric format of the values.
    #[arg(long, value_enum, default_value = "uint8")]
    pub value_format: ValueFormat,
    /// Values to encode.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<i32>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as hex (e.g. 64020a141e).
    pub hex: String,
    /// Numeric format of the values.
    #[arg(long, value_enum, default_value = "uint8")]
    pub value_format: ValueFormat,
}

#[derive(Args, Debug, Default)]
pub struct FormatsArgs {}

#[derive(Args, Debug)]
pub struct LoopbackArgs {
    /// Component tag the receiver subscribes to.
    #[arg(long, short = 'c')]
    pub component: u8,
    /// Instance id.
    #[arg(long, short = 'i', default_value = "0")]
    pub id: u8,
    /// Numeric format of the values.
    #[arg(long, value_enum, default_value = "uint8")]
    pub value_format: ValueFormat,
    /// Largest frame the link carries.
    #[arg(long, default_value_t = remotebit_frame::DEFAULT_MAX_FRAME_SIZE)]
    pub max_frame_size: usize,
    /// Values to send.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<i32>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
