//! Terminal handling with raw ANSI escape sequences
//! No external TUI libraries - just raw escape codes

use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;

/// DOS-style 16 color palette
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0x00, 0x00, 0x00),
            Color::Blue => (0x00, 0x00, 0xAA),
            Color::Green => (0x00, 0xAA, 0x00),
            Color::Cyan => (0x00, 0xAA, 0xAA),
            Color::Red => (0xAA, 0x00, 0x00),
            Color::Magenta => (0xAA, 0x00, 0xAA),
            Color::Brown => (0xAA, 0x55, 0x00),
            Color::LightGray => (0xAA, 0xAA, 0xAA),
            Color::DarkGray => (0x55, 0x55, 0x55),
            Color::LightBlue => (0x55, 0x55, 0xFF),
            Color::LightGreen => (0x55, 0xFF, 0x55),
            Color::LightCyan => (0x55, 0xFF, 0xFF),
            Color::LightRed => (0xFF, 0x55, 0x55),
            Color::LightMagenta => (0xFF, 0x55, 0xFF),
            Color::Yellow => (0xFF, 0xFF, 0x55),
            Color::White => (0xFF, 0xFF, 0xFF),
        }
    }

    /// ANSI SGR foreground code (true color)
    pub fn to_fg_sgr(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("38;2;{};{};{}", r, g, b)
    }

    /// ANSI SGR background code (true color)
    pub fn to_bg_sgr(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("48;2;{};{};{}", r, g, b)
    }
}

/// Mouse button
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    None,
}

/// Mouse event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub row: u16,
    pub col: u16,
    pub pressed: bool,
    pub motion: bool,
}

/// Key events including special keys
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Ctrl(char),
    Mouse(MouseEvent),
    Unknown(Vec<u8>),
}

/// Terminal state manager; restores the terminal on drop
pub struct Terminal {
    stdout: io::Stdout,
    width: u16,
    height: u16,
    orig_termios: Option<libc::termios>,
}

impl Terminal {
    /// Initialize terminal in raw mode with mouse tracking
    pub fn new() -> io::Result<Self> {
        let mut term = Self {
            stdout: io::stdout(),
            width: 80,
            height: 25,
            orig_termios: None,
        };

        term.update_size();
        term.enable_raw_mode()?;

        term.write_raw("\x1b[?25l")?; // Hide cursor
        term.write_raw("\x1b[?1002h")?; // Button-event mouse tracking
        term.write_raw("\x1b[?1006h")?; // SGR extended mouse mode
        term.write_raw("\x1b[2J")?; // Clear screen
        term.write_raw("\x1b[H")?; // Home cursor

        Ok(term)
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Update terminal size from ioctl
    pub fn update_size(&mut self) {
        unsafe {
            let mut ws: libc::winsize = std::mem::zeroed();
            if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) == 0 {
                self.width = ws.ws_col;
                self.height = ws.ws_row;
            }
        }
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        unsafe {
            let fd = io::stdin().as_raw_fd();
            let mut termios: libc::termios = std::mem::zeroed();

            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.orig_termios = Some(termios);

            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_iflag &= !(libc::IXON | libc::ICRNL | libc::BRKINT | libc::INPCK | libc::ISTRIP);
            termios.c_oflag &= !libc::OPOST;
            termios.c_cflag |= libc::CS8;

            // VMIN=0, VTIME=1: short poll so the event loop stays responsive
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = 1;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    fn disable_raw_mode(&self) -> io::Result<()> {
        unsafe {
            if let Some(orig) = self.orig_termios {
                let fd = io::stdin().as_raw_fd();
                if libc::tcsetattr(fd, libc::TCSAFLUSH, &orig) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }
        }
        Ok(())
    }

    /// Write raw bytes to terminal
    pub fn write_raw(&mut self, s: &str) -> io::Result<()> {
        self.stdout.write_all(s.as_bytes())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    /// Move cursor to position (1-based, like ANSI)
    pub fn goto(&mut self, row: u16, col: u16) -> io::Result<()> {
        write!(self.stdout, "\x1b[{};{}H", row, col)
    }

    /// Set foreground and background colors
    pub fn set_colors(&mut self, fg: Color, bg: Color) -> io::Result<()> {
        write!(self.stdout, "\x1b[{};{}m", fg.to_fg_sgr(), bg.to_bg_sgr())
    }

    /// Reset colors to default
    pub fn reset_colors(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[0m")
    }

    /// Clear entire screen
    pub fn clear(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[2J\x1b[H")
    }

    /// Show cursor
    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25h")
    }

    /// Hide cursor
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25l")
    }

    /// Write a character at the current position
    pub fn write_char(&mut self, c: char) -> io::Result<()> {
        write!(self.stdout, "{}", c)
    }

    /// Read a key from input (non-blocking)
    pub fn read_key(&self) -> io::Result<Option<Key>> {
        let mut buf = [0u8; 32];
        let mut stdin = io::stdin();

        let n = stdin.read(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }

        // Lone ESC may be the start of an escape sequence; give the rest
        // of the sequence a moment to arrive
        let mut total = n;
        if buf[0] == 0x1b && n == 1 {
            std::thread::sleep(std::time::Duration::from_millis(10));
            if let Ok(more) = stdin.read(&mut buf[n..]) {
                total += more;
            }
        }

        Ok(Some(Self::parse_key(&buf[..total])))
    }

    /// Parse raw bytes into a Key
    fn parse_key(buf: &[u8]) -> Key {
        // SGR mouse: \x1b[<Cb;Cx;CyM or \x1b[<Cb;Cx;Cym
        if buf.len() >= 6 && buf[0] == 0x1b && buf[1] == b'[' && buf[2] == b'<' {
            if let Some(mouse) = Self::parse_sgr_mouse(buf) {
                return Key::Mouse(mouse);
            }
        }

        match buf {
            [b'\r'] | [b'\n'] => Key::Enter,
            [0x1b] => Key::Escape,
            [0x7f] | [0x08] => Key::Backspace,
            [b'\t'] => Key::Tab,

            // Ctrl+letter (0x01-0x1a)
            [c] if *c >= 1 && *c <= 26 => Key::Ctrl((b'a' + c - 1) as char),

            [c] if *c >= 32 && *c < 127 => Key::Char(*c as char),

            // UTF-8 sequences
            _ if buf.len() >= 2 && buf[0] >= 0xC0 => {
                if let Ok(s) = std::str::from_utf8(buf) {
                    if let Some(c) = s.chars().next() {
                        return Key::Char(c);
                    }
                }
                Key::Unknown(buf.to_vec())
            }

            [0x1b, b'[', b'Z'] => Key::ShiftTab,

            [0x1b, b'[', b'A'] => Key::Up,
            [0x1b, b'[', b'B'] => Key::Down,
            [0x1b, b'[', b'C'] => Key::Right,
            [0x1b, b'[', b'D'] => Key::Left,
            [0x1b, b'[', b'H'] => Key::Home,
            [0x1b, b'[', b'F'] => Key::End,
            [0x1b, b'[', b'1', b'~'] => Key::Home,
            [0x1b, b'[', b'4', b'~'] => Key::End,
            [0x1b, b'[', b'3', b'~'] => Key::Delete,
            [0x1b, b'[', b'5', b'~'] => Key::PageUp,
            [0x1b, b'[', b'6', b'~'] => Key::PageDown,

            [0x1b, b'O', b'P'] | [0x1b, b'[', b'1', b'1', b'~'] => Key::F(1),
            [0x1b, b'O', b'Q'] | [0x1b, b'[', b'1', b'2', b'~'] => Key::F(2),
            [0x1b, b'O', b'R'] | [0x1b, b'[', b'1', b'3', b'~'] => Key::F(3),
            [0x1b, b'O', b'S'] | [0x1b, b'[', b'1', b'4', b'~'] => Key::F(4),

            _ => Key::Unknown(buf.to_vec()),
        }
    }

    /// Parse SGR extended mouse format
    fn parse_sgr_mouse(buf: &[u8]) -> Option<MouseEvent> {
        let s = std::str::from_utf8(buf).ok()?;
        if !s.starts_with("\x1b[<") {
            return None;
        }

        let content = &s[3..];
        let pressed = content.ends_with('M');
        let content = content.trim_end_matches(|c| c == 'M' || c == 'm');

        let parts: Vec<&str> = content.split(';').collect();
        if parts.len() != 3 {
            return None;
        }

        let cb: u8 = parts[0].parse().ok()?;
        let col: u16 = parts[1].parse().ok()?;
        let row: u16 = parts[2].parse().ok()?;

        let button = match cb & 0b11 {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            3 => MouseButton::None,
            _ => return None,
        };

        let motion = (cb & 32) != 0;

        let button = if cb & 64 != 0 {
            if cb & 1 != 0 {
                MouseButton::WheelDown
            } else {
                MouseButton::WheelUp
            }
        } else {
            button
        };

        Some(MouseEvent { button, row, col, pressed, motion })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state on every exit path
        let _ = self.write_raw("\x1b[?1006l");
        let _ = self.write_raw("\x1b[?1002l");
        let _ = self.show_cursor();
        let _ = self.reset_colors();
        let _ = self.clear();
        let _ = self.goto(1, 1);
        let _ = self.flush();
        let _ = self.disable_raw_mode();
    }
}
