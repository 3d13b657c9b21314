//! Network source against a local tiny_http server.

use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpListener},
    path::PathBuf,
    time::Duration,
};

use placeheat::{ConvertConfig, FetchOptions, PlaceheatError, Source, SplatRenderer, convert};
use tiny_http::{Response, Server};

/// Serve `body` with `status` for up to `requests` requests, waiting `delay` before each reply.
fn serve(status: u16, body: &'static str, requests: usize, delay: Duration) -> SocketAddr {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    std::thread::spawn(move || {
        for request in server.incoming_requests().take(requests) {
            std::thread::sleep(delay);
            let resp = Response::from_string(body)
                .with_status_code(status)
                .with_header("Content-Type: text/csv".parse::<tiny_http::Header>().unwrap());
            let _ = request.respond(resp);
        }
    });
    addr
}

/// Answer one request with a 200 that promises more body than it sends, then hang up.
fn serve_short_body(partial: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut byte = [0u8; 1];
        while !head.ends_with(b"\r\n\r\n") && stream.read(&mut byte).unwrap_or(0) == 1 {
            head.push(byte[0]);
        }
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 1000\r\n\r\n{partial}"
        );
        let _ = stream.write_all(reply.as_bytes());
        let _ = stream.flush();
    });
    addr
}

fn read_all(source: &Source, opts: &FetchOptions) -> Result<String, PlaceheatError> {
    let mut r = source.open(opts)?;
    let mut s = String::new();
    r.read_to_string(&mut s).unwrap();
    Ok(s)
}

#[test]
fn ok_response_streams_body() {
    let addr = serve(200, "id,1,2\n", 1, Duration::ZERO);
    let body = read_all(
        &Source::Url(format!("http://{addr}/export.csv")),
        &FetchOptions::default(),
    )
    .unwrap();
    assert_eq!(body, "id,1,2\n");
}

#[test]
fn non_success_status_is_fetch_error_when_checked() {
    let addr = serve(404, "id,1,2\n", 1, Duration::ZERO);
    let err = read_all(
        &Source::Url(format!("http://{addr}/missing.csv")),
        &FetchOptions::default(),
    )
    .unwrap_err();
    match err {
        PlaceheatError::Fetch(msg) => assert!(msg.contains("404")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_success_status_is_ignored_when_unchecked() {
    let addr = serve(500, "id,3,4\n", 1, Duration::ZERO);
    let opts = FetchOptions {
        check_status: false,
        ..FetchOptions::default()
    };
    let body = read_all(&Source::Url(format!("http://{addr}/")), &opts).unwrap();
    assert_eq!(body, "id,3,4\n");
}

#[test]
fn refused_connection_is_fetch_error() {
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let err = read_all(
        &Source::Url(format!("http://127.0.0.1:{port}/")),
        &FetchOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PlaceheatError::Fetch(_)));
}

#[test]
fn stalled_server_hits_timeout() {
    let addr = serve(200, "id,1,2\n", 1, Duration::from_secs(3));
    let opts = FetchOptions {
        timeout: Some(Duration::from_millis(300)),
        ..FetchOptions::default()
    };
    let err = read_all(&Source::Url(format!("http://{addr}/")), &opts).unwrap_err();
    assert!(matches!(err, PlaceheatError::Fetch(_)));
}

#[test]
fn convert_over_http_writes_png() {
    let addr = serve(200, "id,10,990\nid,500,500\nid,990,10\n", 1, Duration::ZERO);
    let dir = PathBuf::from("target").join("fetch_http");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let cfg = ConvertConfig {
        source: Source::Url(format!("http://{addr}/export.csv")),
        out_path: out_path.clone(),
        ..ConvertConfig::default()
    };
    let report = convert(&cfg, &SplatRenderer).unwrap();
    assert_eq!(report.points, 3);

    let img = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (1000, 1000));
}

#[test]
fn bad_csv_over_http_is_parse_error() {
    let addr = serve(200, "id,abc,1\n", 1, Duration::ZERO);
    let dir = PathBuf::from("target").join("fetch_http_bad");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let cfg = ConvertConfig {
        source: Source::Url(format!("http://{addr}/")),
        out_path: out_path.clone(),
        ..ConvertConfig::default()
    };
    let err = convert(&cfg, &SplatRenderer).unwrap_err();
    assert!(matches!(err, PlaceheatError::Parse { .. }));
    assert!(!out_path.exists());
}

#[test]
fn body_cut_short_is_record_parse_error() {
    let addr = serve_short_body("id,1,2\nid,3,");
    let dir = PathBuf::from("target").join("fetch_http_short");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let cfg = ConvertConfig {
        source: Source::Url(format!("http://{addr}/export.csv")),
        out_path: out_path.clone(),
        ..ConvertConfig::default()
    };
    let err = convert(&cfg, &SplatRenderer).unwrap_err();
    match err {
        PlaceheatError::Parse { field, line, .. } => {
            assert_eq!(field, "record");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out_path.exists());
}
