//! Two remotes over an in-process link: button presses on one side are
//! echoed back as speed values to the other.
//!
//! Run with:
//!   cargo run --example button-echo

use std::sync::Arc;

use remotebit::frame::{InstanceId, NumericFormat, ReceivedComponent, SendComponent};
use remotebit::link::MemoryLink;
use remotebit::peer::Remote;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (board_link, phone_link) = MemoryLink::pair();
    let board = Arc::new(Remote::new(board_link));
    let phone = Remote::new(phone_link);
    board.start();
    phone.start();

    // Board: every button press is answered with a speed reading.
    let replier = Arc::clone(&board);
    let button = InstanceId::new(0)?;
    board.on_received(
        ReceivedComponent::Button,
        button,
        NumericFormat::UInt8,
        move |values| {
            let pressed = values.first().copied().unwrap_or(0);
            let speed = if pressed != 0 { 250 } else { 0 };
            if let Err(err) =
                replier.send(SendComponent::Speed, button, &[speed], NumericFormat::UInt16LE)
            {
                eprintln!("reply failed: {err}");
            }
        },
    );

    // Phone: listen for speed on the component tag the board sends.
    phone.on_received_raw(
        SendComponent::Speed.into(),
        button.get(),
        NumericFormat::UInt16LE,
        |values| eprintln!("speed: {values:?}"),
    );

    eprintln!("connected: {}", phone.is_connected());
    for pressed in [1, 0, 1] {
        phone.send_raw(
            ReceivedComponent::Button.into(),
            button.get(),
            &[pressed],
            NumericFormat::UInt8,
        )?;
    }

    Ok(())
}
