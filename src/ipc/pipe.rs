use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use super::framing::{Frame, FrameBuffer};
use crate::error::AppError;
use crate::models::Envelope;
use crate::services::Dispatcher;

const READ_CHUNK: usize = 4096;

/// Runs the request/response loop for one pipe client until it hangs up.
pub async fn serve_connection<S>(mut stream: S, dispatcher: Arc<Dispatcher>) -> Result<(), AppError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut frames = FrameBuffer::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            if !frames.is_empty() {
                debug!("Pipe client left {} unparsed bytes", frames.len());
            }
            return Ok(());
        }

        let line = match frames.push(&chunk[..n]) {
            Frame::Incomplete => continue,
            Frame::Complete(value) => {
                debug!("Pipe request: {}", value);
                let envelope = dispatcher.handle_value(value);
                if !envelope.is_success() {
                    debug!("Pipe request answered with a failure envelope");
                }
                envelope.to_line()?
            }
            Frame::Invalid(e) => {
                warn!("Discarding malformed pipe input: {}", e);
                Envelope::failure(format!("Invalid JSON: {}", e)).to_line()?
            }
        };

        debug!("Pipe response: {}", line.trim_end());
        stream.write_all(line.as_bytes()).await?;
        stream.flush().await?;
    }
}

async fn run_client<S>(stream: S, dispatcher: Arc<Dispatcher>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    info!("Pipe client connected");
    match serve_connection(stream, dispatcher).await {
        Ok(()) => info!("Pipe client disconnected"),
        Err(e) => error!("Pipe connection error: {}", e),
    }
}

/// Clears a dead socket left at `path` by an earlier run. Anything that is
/// not a socket, or a socket something still listens on, is left alone.
#[cfg(unix)]
fn remove_stale_endpoint(path: &std::path::Path) -> Result<(), AppError> {
    use std::io::ErrorKind;
    use std::os::unix::fs::FileTypeExt;
    use std::os::unix::net::UnixStream;

    let name = path.display().to_string();
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(AppError::bind(name, e)),
    };
    if !metadata.file_type().is_socket() {
        return Err(AppError::EndpointNotSocket(name));
    }

    match UnixStream::connect(path) {
        Ok(_stream) => Err(AppError::EndpointInUse(name)),
        Err(e) if e.kind() == ErrorKind::ConnectionRefused || e.kind() == ErrorKind::NotFound => {
            std::fs::remove_file(path).map_err(|e| AppError::bind(name.clone(), e))?;
            debug!("Removed stale pipe endpoint {}", name);
            Ok(())
        }
        Err(e) => Err(AppError::bind(name, e)),
    }
}

/// Binds the pipe endpoint and serves clients until the listener fails.
#[cfg(unix)]
pub async fn serve(name: &str, dispatcher: Arc<Dispatcher>) -> Result<(), AppError> {
    use tokio::net::UnixListener;

    remove_stale_endpoint(std::path::Path::new(name))?;

    let listener = UnixListener::bind(name).map_err(|e| AppError::bind(name, e))?;
    info!("Pipe server listening on {}", name);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(run_client(stream, Arc::clone(&dispatcher)));
            }
            Err(e) => warn!("Pipe accept error: {}", e),
        }
    }
}

/// Serves clients on a Windows named pipe. A fresh server instance is
/// created before each connected one is handed off.
#[cfg(windows)]
pub async fn serve(name: &str, dispatcher: Arc<Dispatcher>) -> Result<(), AppError> {
    use tokio::net::windows::named_pipe::ServerOptions;

    let mut server = ServerOptions::new()
        .first_pipe_instance(true)
        .create(name)
        .map_err(|e| AppError::bind(name, e))?;
    info!("Pipe server listening on {}", name);

    loop {
        if let Err(e) = server.connect().await {
            warn!("Pipe accept error: {}", e);
            server = ServerOptions::new().create(name).map_err(|e| AppError::bind(name, e))?;
            continue;
        }

        let connected = server;
        server = ServerOptions::new().create(name).map_err(|e| AppError::bind(name, e))?;
        tokio::spawn(run_client(connected, Arc::clone(&dispatcher)));
    }
}
