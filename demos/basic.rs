//! Basic projection: declare a source, declare a shape, project.
//!
//! Run with: `cargo run --example basic`

use shapecast::prelude::*;

struct HttpRequest {
    method: String,
    path: String,
    body_len: usize,
}

impl_introspect!(HttpRequest, "HttpRequest", |b| b
    .field("method", |r: &HttpRequest| &r.method)
    .field("path", |r: &HttpRequest| &r.path)
    .field("body_len", |r: &HttpRequest| &r.body_len)
    .finish());

struct RequestLine {
    method: String,
    path: String,
}

impl_shape!(RequestLine, "RequestLine", |b| b
    .value::<String>("method")
    .value::<String>("path")
    .finish(|slots| RequestLine {
        method: slots.take(),
        path: slots.take(),
    }));

// A shape that does not fit: one member is missing, one has the wrong
// type. The diagnosis reports both at once.
struct WrongLine {
    verb: String,
    body_len: u32,
}

impl_shape!(WrongLine, "WrongLine", |b| b
    .value::<String>("verb")
    .value::<u32>("body_len")
    .finish(|slots| WrongLine {
        verb: slots.take(),
        body_len: slots.take(),
    }));

fn main() {
    let request = HttpRequest {
        method: "GET".to_owned(),
        path: "/healthz".to_owned(),
        body_len: 0,
    };

    let line: RequestLine = project(&request).expect("RequestLine fits HttpRequest");
    println!("{} {}", line.method, line.path);

    match project::<WrongLine>(&request) {
        Ok(_) => unreachable!(),
        Err(ProjectionError::ShapeMismatch(diagnosis)) => {
            println!("\nas expected, WrongLine does not fit:\n{diagnosis}");
        }
        Err(other) => println!("unexpected error: {other}"),
    }
}
