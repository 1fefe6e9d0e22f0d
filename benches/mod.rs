use criterion::{criterion_group, criterion_main};

mod network {
    pub mod application {
        pub mod http {
            pub mod sender;
        }
    }
}

criterion_group!(
    benches,
    network::application::http::sender::bench_send_raw,
    network::application::http::sender::bench_send_json,
    network::application::http::sender::bench_send_chunked_reply
);
criterion_main!(benches);
