use async_trait::async_trait;
use reqwest::Url;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

use crate::errors::{invalid_redirect_error, io_error};
use crate::Error;

/// Point where the authorization flow waits for the user
///
/// Implementations show the authorization URL however they like (terminal,
/// GUI, local callback server) and return the full URL the browser was
/// redirected to after consent.
#[async_trait]
pub trait RedirectPrompt: Send + Sync {
    async fn redirect_url(&self, authorization_url: &Url) -> Result<String, Error>;
}

/// Opens the browser and reads the redirect URL from stdin
///
/// One reader is kept for the lifetime of the prompt, so a second answer
/// typed ahead is still there when the flow asks again.
#[derive(Debug)]
pub struct ConsolePrompt<R = Stdin> {
    input: Mutex<BufReader<R>>,
    open_browser: bool,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self::with_input(tokio::io::stdin())
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncRead + Unpin + Send> ConsolePrompt<R> {
    /// Reads answers from `input` instead of stdin
    pub fn with_input(input: R) -> Self {
        Self {
            input: Mutex::new(BufReader::new(input)),
            open_browser: true,
        }
    }

    /// Only prints the authorization URL
    pub fn without_browser(mut self) -> Self {
        self.open_browser = false;
        self
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> RedirectPrompt for ConsolePrompt<R> {
    async fn redirect_url(&self, authorization_url: &Url) -> Result<String, Error> {
        let mut stdout = tokio::io::stdout();
        let message = format!(
            "Please go to this URL and authorize access:\n{}\n",
            authorization_url
        );
        stdout
            .write_all(message.as_bytes())
            .await
            .map_err(io_error)?;

        if self.open_browser {
            if let Err(err) = webbrowser::open(authorization_url.as_str()) {
                log::warn!("Couldn't open a browser: {}", err);
            }
        }

        stdout
            .write_all(b"\nPaste the full redirect URL here: ")
            .await
            .map_err(io_error)?;
        stdout.flush().await.map_err(io_error)?;

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(io_error)?;
        if read == 0 {
            return Err(invalid_redirect_error("stdin closed before a URL was pasted"));
        }
        Ok(line.trim().to_string())
    }
}
