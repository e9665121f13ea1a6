use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    fs,
    io::{self, BufRead, Write},
};

/// Everything a program can do to the outside world.
///
/// The I/O builtins (`print`, `input`, `input_int`, `clear`, `run`) go through
/// this trait, so an embedding decides where output goes and where input and
/// scripts come from.
pub trait Host {
    /// Writes one line of program output.
    fn write_line(&self, text: &str);
    /// Reads one line of input without its line terminator, or `None` when
    /// input is exhausted.
    fn read_line(&self) -> Option<String>;
    /// Clears the output device.
    fn clear(&self);
    /// Loads the text of a script for `run`.
    fn read_source(&self, path: &str) -> io::Result<String>;
}

/// Standard input and output, and scripts from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdHost;

impl Host for StdHost {
    fn write_line(&self, text: &str) {
        println!("{text}");
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }

    fn clear(&self) {
        print!("\x1B[2J\x1B[1;1H");
        if let Err(e) = io::stdout().flush() {
            log::warn!("failed to flush stdout after clear: {e}");
        }
    }

    fn read_source(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// An in-memory host.
///
/// Captures output, serves queued input lines and in-memory scripts. Used by
/// the tests and handy for embedding.
#[derive(Debug, Default)]
pub struct BufferHost {
    output:  RefCell<Vec<String>>,
    input:   RefCell<VecDeque<String>>,
    sources: RefCell<HashMap<String, String>>,
    clears:  Cell<usize>,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host whose `read_line` returns `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let host = Self::new();
        host.input
            .borrow_mut()
            .extend(lines.into_iter().map(Into::into));
        host
    }

    /// Registers a script that `run(path)` can load.
    pub fn add_source(&self, path: impl Into<String>, text: impl Into<String>) {
        self.sources.borrow_mut().insert(path.into(), text.into());
    }

    /// Lines written so far.
    pub fn output(&self) -> Vec<String> {
        self.output.borrow().clone()
    }

    /// How many times the program cleared the screen.
    pub fn clear_count(&self) -> usize {
        self.clears.get()
    }
}

impl Host for BufferHost {
    fn write_line(&self, text: &str) {
        self.output.borrow_mut().push(text.to_string());
    }

    fn read_line(&self) -> Option<String> {
        self.input.borrow_mut().pop_front()
    }

    fn clear(&self) {
        self.clears.set(self.clears.get() + 1);
    }

    fn read_source(&self, path: &str) -> io::Result<String> {
        self.sources
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}
