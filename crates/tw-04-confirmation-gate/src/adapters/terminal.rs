//! Interactive terminal prompt.
//!
//! The operator confirms by typing the exact device identifier. Any other
//! line declines; end of input dismisses.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

use crate::domain::{ConfirmationError, ConfirmationRequest, SurfaceResponse};
use crate::ports::ConfirmationSurface;

pub struct TerminalSurface<R, W> {
    io: Mutex<(R, W)>,
}

impl TerminalSurface<BufReader<Stdin>, Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> TerminalSurface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }
}

fn io_err(e: std::io::Error) -> ConfirmationError {
    ConfirmationError::Io(e.to_string())
}

#[async_trait]
impl<R, W> ConfirmationSurface for TerminalSurface<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn prompt(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<SurfaceResponse, ConfirmationError> {
        let mut guard = self.io.lock().await;
        let (reader, writer) = &mut *guard;

        let question = format!(
            "\n{}\nType the device identifier ({}) to confirm, anything else cancels: ",
            request.summary, request.device_id
        );
        writer.write_all(question.as_bytes()).await.map_err(io_err)?;
        writer.flush().await.map_err(io_err)?;

        let mut line = String::new();
        let read = reader.read_line(&mut line).await.map_err(io_err)?;
        if read == 0 {
            return Ok(SurfaceResponse::Dismissed);
        }

        if line.trim() == request.device_id {
            Ok(SurfaceResponse::Confirm)
        } else {
            Ok(SurfaceResponse::Decline)
        }
    }
}
