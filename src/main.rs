use std::{
    fs,
    io::{self, BufRead, Write},
    rc::Rc,
};

use basic::{
    interpreter::{environment::Context, host::StdHost, value::core::{Data, Value}},
    run,
};
use clap::Parser;

/// basic is a small, dynamically typed scripting language.
///
/// Without any contents an interactive shell is started.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells basic to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the value of the program once it
    /// finishes.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: Option<String>,
}

/// Formats a program value for the shell: a single top-level statement
/// prints as its own value.
fn shell_display(value: &Value) -> String {
    if let Data::List(elements) = &value.data
       && let [only] = elements.borrow().as_slice()
    {
        return only.to_string();
    }
    value.to_string()
}

fn repl() {
    let mut environment = Context::global(Rc::new(StdHost));
    let stdin = io::stdin();

    loop {
        print!("basic > ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }
        if line.trim().is_empty() {
            continue;
        }

        let (result, env) = run("<stdin>", line.trim_end(), Some(environment));
        environment = env;

        match result {
            Ok(value) => println!("{}", shell_display(&value)),
            Err(e) => eprintln!("{e}"),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let Some(contents) = args.contents else {
        repl();
        return;
    };

    let (source_id, script) = if args.file {
        let script = fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            std::process::exit(1);
        });
        (contents, script)
    } else {
        ("<stdin>".to_string(), contents)
    };

    match run(&source_id, &script, None).0 {
        Ok(value) if args.pipe_mode => println!("{}", shell_display(&value)),
        Ok(_) => {},
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
