use std::io::Cursor;
use std::net::SocketAddr;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use image::{ImageFormat, Rgba, RgbaImage};
use tokio::net::TcpListener;

use imageview_loader::{
    HttpSource, ImageCodec, ImageDecoder, ImageSource, LoadError, LoaderConfig,
};

/// A small valid PNG: 3x2, solid color.
fn encode_test_png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

async fn serve_png() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png".to_string())],
        encode_test_png(),
    )
        .into_response()
}

async fn start_server() -> SocketAddr {
    let app = Router::new().route("/image.png", get(serve_png));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

#[tokio::test]
async fn test_http_source_fetch_and_decode() {
    let addr = start_server().await;
    let url = format!("http://{}/image.png", addr);

    let source = HttpSource::new();
    let bytes = source.fetch(&url).await.unwrap();
    assert_eq!(&bytes[..], &encode_test_png()[..]);

    let image = ImageCodec.decode(&bytes).unwrap();
    assert_eq!(image.width(), 3);
    assert_eq!(image.height(), 2);
}

#[tokio::test]
async fn test_http_source_error_status() {
    let addr = start_server().await;
    let url = format!("http://{}/missing.png", addr);

    let source = HttpSource::new();
    let err = source.fetch(&url).await.unwrap_err();
    assert!(matches!(err, LoadError::HttpStatus(404)));
}

#[tokio::test]
async fn test_http_source_invalid_url() {
    let source = HttpSource::with_config(&LoaderConfig::default()).unwrap();

    let err = source.fetch("not a url").await.unwrap_err();
    assert!(matches!(err, LoadError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_codec_rejects_garbage() {
    let err = ImageCodec.decode(b"definitely not an image").unwrap_err();
    assert!(matches!(err, LoadError::Decode(_)));
}
