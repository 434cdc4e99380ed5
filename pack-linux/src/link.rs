//! TCP stand-ins for the pack's two serial lines. One client per port at a time.

use pack_core::Peer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Something the dispatch task must hear about.
#[derive(Debug)]
pub enum LinkEvent {
    Bytes(Peer, Vec<u8>),
    Closed(Peer),
}

/// Accept clients on `port` forever. Bytes read go to `events`; frames from
/// `outbound` are written to the current client and dropped while none is attached.
pub async fn run_link(
    peer: Peer,
    port: u16,
    events: UnboundedSender<LinkEvent>,
    mut outbound: UnboundedReceiver<Vec<u8>>,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!(?peer, port, "link listening");
    loop {
        let (stream, addr) = tokio::select! {
            accepted = listener.accept() => accepted?,
            dropped = outbound.recv() => {
                match dropped {
                    Some(frame) => tracing::trace!(?peer, len = frame.len(), "no client, frame dropped"),
                    None => return Ok(()),
                }
                continue;
            }
        };
        tracing::info!(?peer, %addr, "client attached");
        if let Err(e) = serve(peer, stream, &events, &mut outbound).await {
            tracing::warn!(?peer, %addr, error = %e, "client link error");
        }
        tracing::info!(?peer, %addr, "client detached");
        if events.send(LinkEvent::Closed(peer)).is_err() {
            return Ok(());
        }
    }
}

async fn serve(
    peer: Peer,
    mut stream: TcpStream,
    events: &UnboundedSender<LinkEvent>,
    outbound: &mut UnboundedReceiver<Vec<u8>>,
) -> std::io::Result<()> {
    let mut buf = [0u8; 512];
    loop {
        tokio::select! {
            n = stream.read(&mut buf) => {
                let n = n?;
                if n == 0 {
                    return Ok(());
                }
                if events.send(LinkEvent::Bytes(peer, buf[..n].to_vec())).is_err() {
                    return Ok(());
                }
            }
            frame = outbound.recv() => match frame {
                Some(frame) => stream.write_all(&frame).await?,
                None => return Ok(()),
            },
        }
    }
}
