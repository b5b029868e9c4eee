//! Lexer running as an independent producer thread.
//!
//! Tokens flow to the consumer through a bounded channel, so a slow parser
//! applies back-pressure to the lexer. The consumer observes exactly the
//! tokens the synchronous [`Lexer`] would produce, in the same order.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::config::LexerConfig;
use crate::lexer::Lexer;
use crate::token::Token;

/// Consumer side of a lexer running on its own thread
#[derive(Debug)]
pub struct StreamingLexer {
    /// Receiving end of the bounded token channel
    receiver: Receiver<Token>,
    /// Producer thread, joined once the end of input marker arrives
    producer: Option<JoinHandle<()>>,
    /// Whether the end of input marker has been received
    done: bool,
}

impl StreamingLexer {
    /// Spawn a producer with default configuration
    pub fn spawn(source: impl Into<String>) -> Self {
        Self::spawn_with_config(source, LexerConfig::default())
    }

    /// Spawn a producer lexing `source` with `config`
    pub fn spawn_with_config(source: impl Into<String>, config: LexerConfig) -> Self {
        let source: String = source.into();
        let (sender, receiver) = mpsc::sync_channel(config.channel_capacity);

        let producer = thread::spawn(move || {
            let mut lexer = Lexer::with_config(&source, config);
            loop {
                let token = lexer.next_token();
                let eof = token.is_eof();
                if sender.send(token).is_err() {
                    debug!("token consumer hung up before end of input");
                    return;
                }
                if eof {
                    return;
                }
            }
        });

        Self {
            receiver,
            producer: Some(producer),
            done: false,
        }
    }

    /// Receive the next token, including the final end of input marker
    pub fn next_token(&mut self) -> Token {
        if self.done {
            return Token::eof(0);
        }
        match self.receiver.recv() {
            Ok(token) => {
                if token.is_eof() {
                    self.finish();
                }
                token
            }
            Err(_) => {
                warn!("lexer thread stopped without an end of input marker");
                self.finish();
                Token::eof(0)
            }
        }
    }

    fn finish(&mut self) {
        self.done = true;
        if let Some(producer) = self.producer.take() {
            if producer.join().is_err() {
                warn!("lexer thread panicked");
            }
        }
    }
}

impl Iterator for StreamingLexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
