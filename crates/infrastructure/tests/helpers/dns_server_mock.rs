use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

type Handler = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// Loopback name server answering on the same port over UDP and TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start<U, T>(udp_handler: U, tcp_handler: T) -> Result<Self, std::io::Error>
    where
        U: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
        T: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        let (socket, listener) = Self::bind_pair().await?;
        let addr = socket.local_addr()?;
        let udp_handler: Handler = Arc::new(udp_handler);
        let tcp_handler: Handler = Arc::new(tcp_handler);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 1500];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let response = udp_handler(&buf[..len]);
                            if !response.is_empty() {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = listener.accept() => {
                        if let Ok((mut stream, _)) = result {
                            let handler = tcp_handler.clone();
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                let response = handler(&query);
                                let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                                let _ = stream.write_all(&response).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn bind_pair() -> Result<(UdpSocket, TcpListener), std::io::Error> {
        let mut last_err = None;
        for _ in 0..16 {
            let socket = UdpSocket::bind("127.0.0.1:0").await?;
            let port = socket.local_addr()?.port();
            match TcpListener::bind(("127.0.0.1", port)).await {
                Ok(listener) => return Ok((socket, listener)),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| std::io::Error::other("no free port pair")))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
