use crate::command::{CommandFactory, ExitCode};
use crate::env::Environment;
use crate::lexer;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use tracing::{debug, warn};

const PROMPT: &str = "inventory> ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the builtin commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive inventory shell.
///
/// The interpreter owns an [`Environment`] (and through it the inventory store)
/// and a list of [`CommandFactory`] objects that are queried in order to create
/// commands by name. See [`Default`] for the commands included out of the box.
///
/// Example
/// ```
/// use inventory_tracker::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out: Vec<u8> = Vec::new();
/// sh.execute_line("add 001 --name Milk --quantity 10 --price 2.50 --expiry 31/12/2026", &mut out)
///     .unwrap();
/// sh.execute_line("total", &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().ends_with("Total stock value: $25.00\n"));
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>, env: Environment) -> Self {
        Self { env, commands }
    }

    /// Create an interpreter with the default commands around `env`.
    pub fn with_environment(env: Environment) -> Self {
        Self::new(default_commands(), env)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Run a single command invocation by name with arguments, writing its
    /// report to standard output.
    ///
    /// Returns the command's exit code or an error if no command has that name.
    pub fn run(&mut self, name: &str, args: &[&str]) -> anyhow::Result<ExitCode> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.run_with_output(name, args, &mut lock)
    }

    fn run_with_output(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                debug!(command = name, ?args, "dispatching");
                return cmd.execute(stdout, &mut self.env);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Split `line` into words and run the command it names.
    ///
    /// A blank line does nothing and succeeds. Lexing errors and unknown
    /// commands come back as errors; command failures come back as a non-zero
    /// exit code with the message already written to `stdout`.
    pub fn execute_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let words = lexer::split_into_words(line)?;
        let Some((name, rest)) = words.split_first() else {
            return Ok(0);
        };
        let args: Vec<&str> = rest.iter().map(|s| s.as_str()).collect();
        self.run_with_output(name, &args, stdout)
    }

    /// Whether a command asked the session to end.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Read-Eval-Print Loop over the terminal.
    ///
    /// Errors from a single line are printed and the loop keeps going; only
    /// `exit`, Ctrl-C, end of input or a terminal failure stop it.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.env.should_exit {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    let result = self.execute_line(&line, &mut std::io::stdout().lock());
                    if let Err(err) = result {
                        warn!(error = %err, "line rejected");
                        println!("Error: {}", err);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

fn default_commands() -> Vec<Box<dyn CommandFactory>> {
    use crate::builtin::*;
    vec![
        Box::new(Factory::<Add>::default()),
        Box::new(Factory::<Update>::default()),
        Box::new(Factory::<Remove>::default()),
        Box::new(Factory::<Search>::default()),
        Box::new(Factory::<Total>::default()),
        Box::new(Factory::<Expiring>::default()),
        Box::new(Factory::<List>::default()),
        Box::new(Factory::<Exit>::default()),
        Box::new(Factory::<Help>::default()),
    ]
}

impl Default for Interpreter {
    /// Create an interpreter with an empty store and the default commands:
    /// `add`, `update`, `remove`, `search`, `total`, `expiring`, `list`, `exit`, `help`.
    fn default() -> Self {
        Self::with_environment(Environment::new())
    }
}
