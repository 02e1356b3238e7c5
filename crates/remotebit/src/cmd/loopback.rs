use std::sync::{Arc, Mutex, PoisonError};

use remotebit_frame::{encode, DecodedFrame, FrameConfig, NumericFormat};
use remotebit_link::MemoryLink;
use remotebit_peer::{Remote, RemoteConfig};
use tracing::info;

use crate::cmd::{received_component_name, LoopbackArgs};
use crate::exit::{frame_error, remote_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: LoopbackArgs, format: OutputFormat) -> CliResult<i32> {
    let value_format = NumericFormat::from(args.value_format);
    let (left, right) = MemoryLink::pair_with_capacity(args.max_frame_size);

    let sender = Remote::with_config(
        left,
        RemoteConfig {
            frame: FrameConfig {
                max_frame_size: args.max_frame_size,
            },
        },
    );
    let receiver = Remote::new(right);
    receiver.start();

    let delivered: Arc<Mutex<Vec<Vec<i32>>>> = Arc::default();
    let sink = Arc::clone(&delivered);
    receiver.on_received_raw(args.component, args.id, value_format, move |values| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(values.to_vec());
    });

    sender
        .send_raw(args.component, args.id, &args.values, value_format)
        .map_err(|err| remote_error("send failed", err))?;

    let delivered =
        std::mem::take(&mut *delivered.lock().unwrap_or_else(PoisonError::into_inner));
    let Some(values) = delivered.into_iter().next() else {
        return Err(CliError::new(FAILURE, "frame was not delivered"));
    };
    info!(values = values.len(), "frame delivered across loopback");

    let wire = encode(args.component, args.id, value_format, &values)
        .map_err(|err| frame_error("re-encode failed", err))?;
    let frame = DecodedFrame {
        component: args.component,
        id: args.id,
        values,
    };
    print_frame(
        &frame,
        received_component_name(frame.component),
        value_format,
        &wire,
        format,
    );
    Ok(SUCCESS)
}
