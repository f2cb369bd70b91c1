//! Nested projection and duck-typed dispatch.
//!
//! Two unrelated source types both expose a `peer` object member and a
//! `bytes` counter; one shape projects from either, decided entirely by
//! the runtime type of the object in hand. The nested `PeerView` pairing
//! is compiled once and shared.
//!
//! Run with: `cargo run --example nested`

use shapecast::{cache, prelude::*};

#[derive(Clone)]
struct Peer {
    host: String,
    port: u16,
}

impl_introspect!(Peer, "Peer", |b| b
    .field("host", |p: &Peer| &p.host)
    .field("port", |p: &Peer| &p.port)
    .finish());

struct TcpConn {
    peer: Peer,
    bytes: u64,
}

impl_introspect!(TcpConn, "TcpConn", |b| b
    .object_field("peer", |c: &TcpConn| &c.peer)
    .field("bytes", |c: &TcpConn| &c.bytes)
    .finish());

struct QuicConn {
    host: String,
    port: u16,
    datagrams: u64,
}

impl_introspect!(QuicConn, "QuicConn", |b| b
    .object_property("peer", |c: &QuicConn| Peer {
        host: c.host.clone(),
        port: c.port,
    })
    .property("bytes", |c: &QuicConn| c.datagrams * 1200)
    .finish());

struct PeerView {
    host: String,
    port: u16,
}

impl_shape!(PeerView, "PeerView", |b| b
    .value::<String>("host")
    .value::<u16>("port")
    .finish(|slots| PeerView {
        host: slots.take(),
        port: slots.take(),
    }));

struct ConnView {
    peer: PeerView,
    bytes: u64,
}

impl_shape!(ConnView, "ConnView", |b| b
    .nested::<PeerView>("peer")
    .value::<u64>("bytes")
    .finish(|slots| ConnView {
        peer: slots.take(),
        bytes: slots.take(),
    }));

fn describe(source: &dyn Introspect) {
    match project::<ConnView>(source) {
        Ok(view) => println!(
            "{}:{} transferred {} bytes",
            view.peer.host, view.peer.port, view.bytes
        ),
        Err(error) => println!("no connection view: {error}"),
    }
}

fn main() {
    let tcp = TcpConn {
        peer: Peer {
            host: "db.internal".to_owned(),
            port: 5432,
        },
        bytes: 870_912,
    };
    let quic = QuicConn {
        host: "edge.example.com".to_owned(),
        port: 443,
        datagrams: 64,
    };

    describe(&tcp);
    describe(&quic);

    println!("\ncached pairings:");
    cache::debug_entries(|entry| println!("  {entry}"));
}
