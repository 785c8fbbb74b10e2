// Showcase - draws a shaded scene into a pixel buffer and blits it each frame
// Run: cargo run --example showcase --features crossterm

use cellgl::{
    Color, CrosstermSurface, FrameStatus, Pixel, PixelBuffer, Shader, Texture, Window,
    WindowConfig,
};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run();

    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }

    result
}

fn run() -> anyhow::Result<()> {
    let (cols, rows) = terminal::size()?;
    let config = WindowConfig::new("cellgl showcase", cols as u32, rows as u32);
    let mut buffer = config.new_buffer();
    let mut window = Window::new(CrosstermSurface::stdout(), config)?;

    let sprite = Texture::from_text(
        &["+------+", "| cell |", "|  gl  |", "+------+"],
        Color::Yellow,
        Color::DarkBlue,
    );

    let mut frame: i32 = 0;
    let mut dropped = 0usize;
    loop {
        if event::poll(Duration::from_millis(33))? {
            if let Event::Key(key) = event::read()? {
                let quit = key.code == KeyCode::Char('q')
                    || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    break;
                }
            }
        }

        draw(&mut buffer, &sprite, frame, dropped);
        if window.render(&buffer)? == FrameStatus::Dropped {
            dropped += 1;
        }
        frame = frame.wrapping_add(1);
    }

    Ok(())
}

fn draw(buffer: &mut PixelBuffer, sprite: &Texture, frame: i32, dropped: usize) {
    let (w, h) = (buffer.width() as i32, buffer.height() as i32);

    buffer.clear(Pixel::EMPTY);
    buffer.set_rectangle(0, h - 1, w, 1, Pixel::new(' ', Color::White, Color::DarkGray));
    buffer.set_string(
        1,
        h - 1,
        &format!("frame {} | dropped {} | q to quit", frame, dropped),
        Color::White,
        Color::DarkGray,
    );

    let span = (w - sprite.width() as i32).max(1);
    let x = (frame % (span * 2) - span).abs();
    buffer.set_texture(x, h / 2 - 2, sprite);

    let stripes = Shader::new(0, 0, w, h - 2, move |x: i32, y: i32, p: Pixel| {
        if p == Pixel::EMPTY && (x + y + frame / 2) % 8 == 0 {
            Pixel::new('.', Color::DarkCyan, Color::Black)
        } else {
            p
        }
    });
    buffer.apply_shader(&stripes);
}
