//! Loading the query text and turning the shared flags into parse options.

use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use xqsyntax_lib::{
    Dialect, Diagnostics, LexerState, Parse, ParseOptions, Token, lex, parse_with,
    restart_point, tokenize,
};

pub struct InputArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub dialect: Dialect,
    pub from: usize,
    pub state: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("query is required: use a positional file, `-` for stdin, or -q/--query")]
    Missing,

    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("--from {offset} is past the end of the query ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },

    #[error("--from {0} is not on a character boundary")]
    SplitsCharacter(usize),

    #[error("--from {offset} is not at a token start (nearest token starts at {nearest})")]
    NotTokenStart { offset: usize, nearest: usize },

    #[error(
        "--from {offset} is inside {depth} open construct(s); a state code cannot restore it, \
         restart at offset {restart} with --state {code:#06x} or omit --state"
    )]
    NotRestartable {
        offset: usize,
        depth: usize,
        restart: usize,
        code: u32,
    },

    #[error("--state {given:#06x} does not match the lexer state {actual:#06x} at offset {offset}")]
    StateMismatch { given: u32, actual: u32, offset: usize },

    #[error(transparent)]
    Lib(#[from] xqsyntax_lib::Error),
}

/// Query text plus everything needed to lex or parse it.
pub struct Input {
    pub name: String,
    pub text: String,
    pub options: ParseOptions,
}

impl InputArgs {
    pub fn load(&self) -> Result<Input, InputError> {
        let (name, text) = self.read()?;
        if self.from > text.len() {
            return Err(InputError::OutOfBounds {
                offset: self.from,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(self.from) {
            return Err(InputError::SplitsCharacter(self.from));
        }
        let state = start_state(&text, self.from, self.state)?;
        let options = ParseOptions::new(self.dialect).with_start(self.from, state);
        tracing::debug!(%name, dialect = %self.dialect, from = self.from, "loaded query");
        Ok(Input {
            name,
            text,
            options,
        })
    }

    fn read(&self) -> Result<(String, String), InputError> {
        if let Some(text) = &self.query_text {
            return Ok(("<query>".to_owned(), text.clone()));
        }
        let Some(path) = &self.query_path else {
            return Err(InputError::Missing);
        };
        if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(InputError::Stdin)?;
            return Ok(("<stdin>".to_owned(), buf));
        }
        let name = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(text) => Ok((name, text)),
            Err(source) => Err(InputError::Read { path: name, source }),
        }
    }
}

/// Lexer state to resume at `from`.
///
/// At offset 0 a code lexes the text as a fragment in that state. Further in, the
/// state comes from lexing the prefix: without a code the saved state is used as
/// is, and a given code must be exact there, so positions inside open
/// constructs are refused. Nothing is lexed at the end of the text.
pub fn start_state(text: &str, from: usize, code: Option<u32>) -> Result<LexerState, InputError> {
    if from == 0 || from == text.len() {
        return match code {
            Some(code) => Ok(LexerState::try_from_code(code)?),
            None => Ok(LexerState::default()),
        };
    }
    let tokens = tokenize(text);
    let at = tokens.partition_point(|t| usize::from(t.span.start()) < from);
    let Some(token) = tokens.get(at).filter(|t| usize::from(t.span.start()) == from) else {
        let nearest = restart_point(&tokens, from).map_or(0, |t| usize::from(t.span.start()));
        return Err(InputError::NotTokenStart {
            offset: from,
            nearest,
        });
    };
    let Some(given) = code else {
        return Ok(token.state.clone());
    };
    let Some(actual) = token.state.exact_code() else {
        let (restart, code) = restart_point(&tokens, from)
            .and_then(|t| Some((usize::from(t.span.start()), t.state.exact_code()?)))
            .unwrap_or((0, 0));
        return Err(InputError::NotRestartable {
            offset: from,
            depth: token.state.depth(),
            restart,
            code,
        });
    };
    if given != actual {
        return Err(InputError::StateMismatch {
            given,
            actual,
            offset: from,
        });
    }
    Ok(token.state.clone())
}

impl Input {
    pub fn parse(&self) -> Parse {
        parse_with(&self.text, &self.options)
    }

    pub fn tokens(&self) -> Vec<Token> {
        lex(
            &self.text,
            self.options.start_offset,
            self.text.len(),
            self.options.start_state.clone(),
        )
    }

    /// Annotated diagnostics on stderr.
    pub fn report(&self, diagnostics: &Diagnostics, color: bool) {
        let rendered = diagnostics
            .printer()
            .source(&self.text)
            .path(&self.name)
            .colored(color)
            .render();
        eprintln!("{}", rendered.trim_end());
    }
}

pub fn fail(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
