use remotebit_frame::{decode_frame, NumericFormat, HEADER_SIZE};
use tracing::warn;

use crate::cmd::{received_component_name, DecodeArgs};
use crate::exit::{frame_error, hex_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let value_format = NumericFormat::from(args.value_format);
    let wire = parse_hex(&args.hex)?;
    let frame =
        decode_frame(&wire, value_format).map_err(|err| frame_error("decode failed", err))?;

    let trailing = (wire.len() - HEADER_SIZE) % value_format.width();
    if trailing != 0 {
        warn!(trailing, "ignored trailing bytes that do not complete a value");
    }

    print_frame(
        &frame,
        received_component_name(frame.component),
        value_format,
        &wire,
        format,
    );
    Ok(SUCCESS)
}

/// Parse hex, tolerating whitespace, `:` and `-` separators and a `0x` prefix.
fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    hex::decode(digits).map_err(|err| hex_error("invalid hex frame", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::DATA_INVALID;

    #[test]
    fn parse_hex_accepts_separators() {
        assert_eq!(parse_hex("64020a141e").unwrap(), vec![100, 2, 10, 20, 30]);
        assert_eq!(parse_hex("0x6500FFFF").unwrap(), vec![101, 0, 255, 255]);
        assert_eq!(parse_hex("65:00 ff-ff").unwrap(), vec![101, 0, 255, 255]);
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        let err = parse_hex("6g").unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
        assert!(parse_hex("abc").is_err());
    }
}
