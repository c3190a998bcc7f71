use ferrous_recursor_application::use_cases::HandleDnsQueryUseCase;
use ferrous_recursor_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Largest client datagram accepted.
const MAX_UDP_QUERY_SIZE: usize = 1500;
const TCP_READ_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: Arc<HandleDnsQueryUseCase>,
) -> anyhow::Result<()> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
    let tcp_listener = create_tcp_listener(domain, socket_addr)?;

    info!(bind_address = %socket_addr, "DNS server listening on UDP and TCP");

    let mut join_set: JoinSet<()> = JoinSet::new();
    join_set.spawn(run_udp_listener(udp_socket, handler.clone()));
    join_set.spawn(run_tcp_listener(tcp_listener, handler));

    while join_set.join_next().await.is_some() {}
    Ok(())
}

async fn run_udp_listener(socket: Arc<UdpSocket>, handler: Arc<HandleDnsQueryUseCase>) {
    let mut recv_buf = [0u8; MAX_UDP_QUERY_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();

        tokio::spawn(async move {
            let Some(response) = handler.execute(&query).await else {
                debug!(client = %from, "No answer for UDP query");
                return;
            };

            if let Err(e) = socket.send_to(&response, from).await {
                error!(client = %from, error = %e, "Failed to send UDP response");
            }
        });
    }
}

async fn run_tcp_listener(listener: TcpListener, handler: Arc<HandleDnsQueryUseCase>) {
    loop {
        let (stream, from) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "TCP accept error");
                continue;
            }
        };

        let handler = handler.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_tcp_connection(stream, &handler).await {
                warn!(client = %from, error = %e, "TCP connection failed");
            }
        });
    }
}

/// One length-prefixed query in, at most one length-prefixed reply out.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    handler: &HandleDnsQueryUseCase,
) -> anyhow::Result<()> {
    let query = tokio::time::timeout(TCP_READ_TIMEOUT, read_with_length_prefix(&mut stream)).await??;

    match handler.execute(&query).await {
        Some(response) => send_with_length_prefix(&mut stream, &response).await?,
        None => debug!("No answer for TCP query"),
    }

    Ok(())
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
