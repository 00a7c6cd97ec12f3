//! Draws a greeting and follows window resizes.
//!
//! Run from an interactive terminal with `cargo run --example hello`.
//! Resize the window to redraw; after a few quiet seconds the original
//! terminal mode is restored and the program exits.

use std::io;
use std::os::unix::io::AsRawFd;
use std::sync::mpsc;
use std::time::Duration;

use termgrid::term::Terminal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stdin = io::stdin();
    let mut terminal = Terminal::new();
    terminal.open(stdin.as_raw_fd())?;

    let (tx, rx) = mpsc::sync_channel(8);
    terminal.subscribe_to_resizes(tx);

    draw(&terminal);
    terminal.refresh()?;

    while let Ok(size) = rx.recv_timeout(Duration::from_secs(5)) {
        log::info!("window now {}x{}", size.cols, size.rows);
        draw(&terminal);
        terminal.refresh()?;
    }

    terminal.close()?;
    println!("bye");
    Ok(())
}

fn draw(terminal: &Terminal) {
    let mut screen = terminal.screen();
    let (width, height) = (screen.width(), screen.height());
    screen.clear();

    let message = format!("hello from a {}x{} terminal", width, height);
    let col = (width as isize - message.chars().count() as isize) / 2;
    screen.set_row(col, height / 2, &message);
    screen.set_row(
        0,
        height.saturating_sub(1),
        "resize the window to redraw, or wait to exit",
    );
}
