use bar_core::{BarError, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Longest wait for the TCP connect plus the server greeting.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Key/value lines of one successful command, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pairs: Vec<(String, String)>,
}

impl Response {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, e.g. the subsystems reported by `idle`.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// One line of a server reply.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Pair(String, String),
    Ok,
    Ack(String),
}

fn parse_line(line: &str) -> Result<Line> {
    if line == "OK" {
        return Ok(Line::Ok);
    }
    if let Some(err) = line.strip_prefix("ACK ") {
        return Ok(Line::Ack(err.to_string()));
    }
    line.split_once(": ")
        .map(|(k, v)| Line::Pair(k.to_string(), v.to_string()))
        .ok_or_else(|| BarError::Mpd(format!("malformed line: {line}")))
}

/// A single TCP connection speaking the MPD protocol.
#[derive(Debug)]
pub struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    version: String,
}

impl Connection {
    /// Connect and consume the `OK MPD <version>` greeting.
    ///
    /// Gives up after [`CONNECT_TIMEOUT`] so an unreachable host fails fast.
    pub async fn connect(addr: &str) -> Result<Self> {
        tokio::time::timeout(CONNECT_TIMEOUT, Self::handshake(addr))
            .await
            .map_err(|_| BarError::Mpd(format!("connect {addr}: timed out")))?
    }

    async fn handshake(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| BarError::Mpd(format!("connect {addr}: {e}")))?;
        let (read, writer) = stream.into_split();
        let mut conn = Self {
            reader: BufReader::new(read),
            writer,
            version: String::new(),
        };

        let greeting = conn.read_line().await?;
        conn.version = greeting
            .strip_prefix("OK MPD ")
            .ok_or_else(|| BarError::Mpd(format!("unexpected greeting: {greeting}")))?
            .to_string();
        Ok(conn)
    }

    /// Protocol version announced by the server.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Send one command line and collect its reply.
    pub async fn command(&mut self, cmd: &str) -> Result<Response> {
        self.writer
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| BarError::Mpd(format!("write: {e}")))?;

        let mut pairs = Vec::new();
        loop {
            let line = self.read_line().await?;
            match parse_line(&line)? {
                Line::Pair(k, v) => pairs.push((k, v)),
                Line::Ok => return Ok(Response::from_pairs(pairs)),
                Line::Ack(err) => return Err(BarError::Mpd(format!("{cmd}: {err}"))),
            }
        }
    }

    /// Block until one of `subsystems` changes; returns the changed ones.
    pub async fn idle(&mut self, subsystems: &[&str]) -> Result<Vec<String>> {
        let cmd = if subsystems.is_empty() {
            "idle".to_string()
        } else {
            format!("idle {}", subsystems.join(" "))
        };
        let resp = self.command(&cmd).await?;
        Ok(resp.all("changed").into_iter().map(String::from).collect())
    }

    async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| BarError::Mpd(format!("read: {e}")))?;
        if n == 0 {
            return Err(BarError::Mpd("connection closed".into()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Serve one connection: greet, then answer each request line with the
    /// next canned reply.
    pub(crate) async fn fake_server(replies: Vec<&'static str>) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let task = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();
            write.write_all(b"OK MPD 0.23.5\n").await.unwrap();

            let mut seen = Vec::new();
            for reply in replies {
                let Ok(Some(req)) = lines.next_line().await else { break };
                seen.push(req);
                write.write_all(reply.as_bytes()).await.unwrap();
            }
            seen
        });

        (addr, task)
    }

    #[test]
    fn line_kinds() {
        assert_eq!(parse_line("OK").unwrap(), Line::Ok);
        assert_eq!(
            parse_line("Artist: Boards of Canada").unwrap(),
            Line::Pair("Artist".into(), "Boards of Canada".into())
        );
        assert_eq!(
            parse_line("ACK [50@0] {play} No such song").unwrap(),
            Line::Ack("[50@0] {play} No such song".into())
        );
        assert!(parse_line("nonsense").is_err());
    }

    #[tokio::test]
    async fn command_collects_pairs() {
        let (addr, server) =
            fake_server(vec!["state: play\nvolume: 40\nOK\n"]).await;

        let mut conn = Connection::connect(&addr).await.unwrap();
        assert_eq!(conn.version(), "0.23.5");

        let resp = conn.command("status").await.unwrap();
        assert_eq!(resp.get("state"), Some("play"));
        assert_eq!(resp.get("volume"), Some("40"));
        assert_eq!(server.await.unwrap(), vec!["status"]);
    }

    #[tokio::test]
    async fn ack_becomes_error() {
        let (addr, _server) =
            fake_server(vec!["ACK [2@0] {pause} wrong number of arguments\n"]).await;
        let mut conn = Connection::connect(&addr).await.unwrap();
        let err = conn.command("pause x").await.unwrap_err();
        assert!(matches!(err, BarError::Mpd(msg) if msg.contains("wrong number")));
    }

    #[tokio::test]
    async fn idle_reports_changed_subsystems() {
        let (addr, server) = fake_server(vec!["changed: player\nOK\n"]).await;
        let mut conn = Connection::connect(&addr).await.unwrap();
        assert_eq!(conn.idle(&["player"]).await.unwrap(), vec!["player"]);
        assert_eq!(server.await.unwrap(), vec!["idle player"]);
    }
}
