use criterion::{BatchSize, Criterion, Throughput};
use libpost::message::{BufferedContext, JsonMessage, RawMessage};
use libpost::network::application::http::{HttpMessageSender, Options};
use libpost::network::error::Error;
use libpost::network::{Close, Connect, Connection, Read, Write};
use serde::Serialize;
use std::hint::black_box;

/// Replays a canned response and discards everything written.
struct MemoryConnection {
    response: &'static [u8],
    pos: usize,
}

impl Read for MemoryConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let len = buf.len().min(self.response.len() - self.pos);
        buf[..len].copy_from_slice(&self.response[self.pos..self.pos + len]);
        self.pos += len;
        Ok(len)
    }
}

impl Write for MemoryConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(black_box(buf).len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MemoryConnection {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Connection for MemoryConnection {}

struct MemoryNetwork {
    response: &'static [u8],
}

impl Connect for MemoryNetwork {
    type Connection = MemoryConnection;
    type Error = Error;

    fn connect(&mut self, _remote: &str) -> Result<Self::Connection, Self::Error> {
        Ok(MemoryConnection {
            response: self.response,
            pos: 0,
        })
    }
}

const REPLY: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/xml\r\nContent-Length: 53\r\n\r\n<Envelope><Body><ack>received</ack></Body></Envelope>";

const CHUNKED_REPLY: &[u8] = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n10\r\n<Envelope><Body>\r\n11\r\n<ack>chunked</ack\r\n12\r\n></Body></Envelope\r\n1\r\n>\r\n0\r\n\r\n";

fn sender(response: &'static [u8]) -> HttpMessageSender<'static, MemoryNetwork> {
    HttpMessageSender::new(
        MemoryNetwork { response },
        Options::new("http://bench.local/ws/endpoint"),
    )
}

#[derive(Serialize)]
struct Reading<'a> {
    device: &'a str,
    sequence: u32,
    samples: [f32; 8],
}

pub fn bench_send_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("send_raw");
    let payload = [b'x'; 1024];
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("send_raw", |b| {
        b.iter_batched_ref(
            || sender(REPLY),
            |sender| {
                let request = RawMessage::new(&payload).with_soap_action("urn:bench");
                let mut context: BufferedContext<'_, _> = BufferedContext::new(&request);
                sender
                    .send_and_receive(&mut context)
                    .expect("Failed to send");
                black_box(context.take_response());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_send_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("send_json");
    let reading = Reading {
        device: "bench-sensor",
        sequence: 42,
        samples: [0.5; 8],
    };
    group.bench_function("send_json", |b| {
        b.iter_batched_ref(
            || sender(REPLY),
            |sender| {
                let message: JsonMessage<'_, _> = JsonMessage::new(&reading);
                let mut context: BufferedContext<'_, _> = BufferedContext::new(&message);
                sender
                    .send_and_receive(&mut context)
                    .expect("Failed to send");
                black_box(context.take_response());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_send_chunked_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("send_chunked_reply");
    group.bench_function("send_chunked_reply", |b| {
        b.iter_batched_ref(
            || sender(CHUNKED_REPLY),
            |sender| {
                let request = RawMessage::new(b"<Envelope/>");
                let mut context: BufferedContext<'_, _> = BufferedContext::new(&request);
                sender
                    .send_and_receive(&mut context)
                    .expect("Failed to send");
                black_box(context.take_response());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
