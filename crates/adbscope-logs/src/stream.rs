//! Logcat streaming.
//!
//! A reader task pulls lines from the child's stdout, classifies them and
//! hands shown lines to a bounded channel. When the channel is full the
//! reader stops reading, the OS pipe fills up and logcat blocks.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use adbscope_types::StyledLine;

use crate::LineClassifier;

/// Capacity of the line channel between the reader and the printer
pub const LINE_BUFFER: usize = 1024;

/// Streams a logcat child's output through a classifier
pub struct LogcatStream {
    /// Cancellation token for stopping the stream
    cancel: CancellationToken,

    /// Reader task handle
    task: Option<tokio::task::JoinHandle<()>>,
}

impl LogcatStream {
    /// Create an idle stream
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// Line channel sized for [`LogcatStream::start`]
    pub fn channel() -> (mpsc::Sender<StyledLine>, mpsc::Receiver<StyledLine>) {
        mpsc::channel(LINE_BUFFER)
    }

    /// Spawn `command` and forward every shown line to `line_tx`.
    ///
    /// The sender is dropped when the child's output ends, so the receiver
    /// sees `None` after the last line.
    pub fn start(
        &mut self,
        mut command: Command,
        classifier: LineClassifier,
        line_tx: mpsc::Sender<StyledLine>,
    ) -> io::Result<()> {
        let mut child = command
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child has no stdout pipe"))?;

        self.task = Some(self.spawn_reader(child, stdout, classifier, line_tx));
        Ok(())
    }

    fn spawn_reader(
        &self,
        mut child: Child,
        stdout: ChildStdout,
        classifier: LineClassifier,
        line_tx: mpsc::Sender<StyledLine>,
    ) -> tokio::task::JoinHandle<()> {
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();

            loop {
                buf.clear();

                let read = tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = reader.read_until(b'\n', &mut buf) => result,
                };

                match read {
                    Ok(0) => {
                        // Stream ended (device gone or logcat exited)
                        break;
                    }
                    Ok(_) => {
                        let Some(line) = decode_line(&buf) else {
                            tracing::debug!(bytes = buf.len(), "skipping undecodable line");
                            continue;
                        };

                        let Some(styled) = classifier.style(line) else {
                            continue;
                        };

                        // Waits while the channel is full
                        let sent = tokio::select! {
                            _ = cancel.cancelled() => break,
                            sent = line_tx.send(styled) => sent,
                        };

                        if sent.is_err() {
                            // Channel closed, stop streaming
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "error reading logcat output");
                        break;
                    }
                }
            }

            let _ = child.start_kill();
            match child.wait().await {
                Ok(status) => tracing::debug!(%status, "logcat exited"),
                Err(e) => tracing::debug!(error = %e, "failed to reap logcat"),
            }
        })
    }

    /// Stop the stream and wait for the child to be reaped
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Stop the stream without waiting
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        // Create a fresh cancellation token for a future stream
        self.cancel = CancellationToken::new();
    }
}

impl Default for LogcatStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogcatStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Strip the line terminator; `None` if the bytes are not UTF-8
fn decode_line(buf: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(buf).ok()?;
    Some(text.trim_end_matches(['\n', '\r']))
}
