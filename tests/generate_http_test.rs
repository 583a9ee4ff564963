// End-to-end generation against a local HTTP stub standing in for the QR service
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use qr_creator::qr_creator::{
    GenerationPhase, HttpFetcher, Notice, Notifier, QrConfig, QrError, QrWorkflow,
};

fn create_png_bytes(size: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(size, size, |x, y| {
        if (x / 15 + y / 15) % 2 == 0 {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("failed to encode test image");
    cursor.into_inner()
}

/// Serves one canned response per entry, returning the raw request lines it saw.
fn spawn_stub(responses: Vec<(&'static str, Vec<u8>)>) -> (u16, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server failed");
    let port = listener.local_addr().expect("read local addr failed").port();

    let server = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status_line, body) in responses {
            let (mut stream, _) = listener.accept().expect("accept failed");

            let mut req_buf = [0u8; 4096];
            let read = stream.read(&mut req_buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&req_buf[..read]).to_string();
            seen.push(request.lines().next().unwrap_or_default().to_string());

            let headers = format!(
                "HTTP/1.1 {}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            stream.write_all(headers.as_bytes()).expect("write headers failed");
            stream.write_all(&body).expect("write body failed");
            stream.flush().expect("flush failed");
        }
        seen
    });

    (port, server)
}

#[derive(Default, Clone)]
struct SharedNotices(Arc<Mutex<Vec<Notice>>>);

impl Notifier for SharedNotices {
    fn notify(&self, notice: &Notice) {
        self.0.lock().expect("notices lock poisoned").push(notice.clone());
    }
}

fn workflow_for(port: u16, notices: SharedNotices) -> QrWorkflow<HttpFetcher, SharedNotices> {
    let mut config = QrConfig::default();
    config.endpoint = format!("http://127.0.0.1:{}/v1/create-qr-code/", port);
    let fetcher = HttpFetcher::new(&config).expect("fetcher init failed");
    QrWorkflow::new(config, fetcher, notices).expect("workflow init failed")
}

#[tokio::test]
async fn example_text_produces_300px_image() {
    let (port, server) = spawn_stub(vec![("200 OK", create_png_bytes(300))]);
    let notices = SharedNotices::default();
    let workflow = workflow_for(port, notices.clone());

    let image = workflow
        .generate("https://example.com", Some("300"))
        .await
        .expect("generation should succeed");
    let requests = server.join().expect("server thread failed");

    assert_eq!(
        requests,
        vec!["GET /v1/create-qr-code/?size=300x300&data=https%3A%2F%2Fexample.com HTTP/1.1".to_string()]
    );
    assert_eq!((image.width(), image.height()), (300, 300));
    assert_eq!(workflow.phase(), GenerationPhase::Ready);
    assert_eq!(
        notices.0.lock().expect("notices lock poisoned").last(),
        Some(&Notice::Generated { size: 300 })
    );
}

#[tokio::test]
async fn error_status_keeps_previous_image() {
    let (port, server) = spawn_stub(vec![
        ("200 OK", create_png_bytes(200)),
        ("404 Not Found", Vec::new()),
    ]);
    let workflow = workflow_for(port, SharedNotices::default());

    let first = workflow
        .generate("keep me", Some("200"))
        .await
        .expect("first generation should succeed");
    let second = workflow.generate("lost", Some("300")).await;
    server.join().expect("server thread failed");

    match second {
        Err(QrError::Network { status, .. }) => assert_eq!(status, Some(404)),
        other => panic!("expected network failure, got {:?}", other),
    }
    let held = workflow.current_image().expect("previous image should remain");
    assert!(Arc::ptr_eq(&held, &first));
    assert_eq!(workflow.phase(), GenerationPhase::Idle);
}

#[tokio::test]
async fn html_body_is_decode_failure() {
    let (port, server) = spawn_stub(vec![(
        "200 OK",
        b"<html><body>not a qr code</body></html>".to_vec(),
    )]);
    let workflow = workflow_for(port, SharedNotices::default());

    let result = workflow.generate("hello", Some("100")).await;
    server.join().expect("server thread failed");

    assert!(matches!(result, Err(QrError::Decode(_))));
    assert!(workflow.current_image().is_none());
}

#[tokio::test]
async fn whitespace_text_never_reaches_the_service() {
    // No stub server: any network attempt would fail with a network error instead.
    let notices = SharedNotices::default();
    let workflow = workflow_for(1, notices.clone());

    let result = workflow.generate("   ", Some("300")).await;

    assert!(matches!(result, Err(QrError::Validation(_))));
    assert_eq!(
        notices.0.lock().expect("notices lock poisoned").as_slice(),
        &[Notice::EmptyInput]
    );
}
