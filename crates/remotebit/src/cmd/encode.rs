use remotebit_frame::{encode, DecodedFrame, NumericFormat};
use tracing::debug;

use crate::cmd::{send_component_name, EncodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let value_format = NumericFormat::from(args.value_format);
    let wire = encode(args.component, args.id, value_format, &args.values)
        .map_err(|err| frame_error("encode failed", err))?;
    debug!(size = wire.len(), "frame encoded");

    let frame = DecodedFrame {
        component: args.component,
        id: args.id,
        values: args.values,
    };
    print_frame(
        &frame,
        send_component_name(frame.component),
        value_format,
        &wire,
        format,
    );
    Ok(SUCCESS)
}
