#[cfg(test)]
mod telemetry_snapshot_tests {
    use std::time::Duration;

    use chunkpress_core::{
        compression::CompressionCodec,
        engine::{compress_with, decompress_with, ApiConfig, CompressParams},
        telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer},
    };

    fn make_counters() -> TelemetryCounters {
        TelemetryCounters { chunks: 2, bytes_input: 200, bytes_output: 50, bytes_overhead: 21 }
    }

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(20)); // ensure elapsed > stage times
        timer.add_stage_time(Stage::Split, Duration::from_millis(5));
        timer.add_stage_time(Stage::Compress, Duration::from_millis(10));
        timer.finish();
        timer
    }

    #[test]
    fn ratio_and_throughput_from_counters() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer());
        assert!((snapshot.compression_ratio - 0.25).abs() < f64::EPSILON);
        assert!(snapshot.throughput_bytes_per_sec > 0.0);
        assert_eq!(snapshot.chunks, 2);
        assert!(snapshot.sanity_check());
    }

    #[test]
    fn empty_input_has_zero_ratio() {
        let snapshot = TelemetrySnapshot::from(&TelemetryCounters::default(), &make_timer());
        assert_eq!(snapshot.compression_ratio, 0.0);
        assert_eq!(snapshot.throughput_bytes_per_sec, 0.0);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut timer = make_timer();
        timer.add_stage_time(Stage::Compress, Duration::from_millis(10));
        let snapshot = TelemetrySnapshot::from(&make_counters(), &timer);
        assert_eq!(snapshot.stage_times.get(Stage::Compress), Duration::from_millis(20));
        assert_eq!(snapshot.total_stage_time(), Duration::from_millis(25));
        assert!(!snapshot.has_all_stages(&[Stage::Write]));
    }

    #[test]
    fn counters_merge() {
        let mut a = make_counters();
        a += make_counters();
        assert_eq!(a, TelemetryCounters { chunks: 4, bytes_input: 400, bytes_output: 100, bytes_overhead: 42 });
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"bytes_input\":200"));
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chunks, snapshot.chunks);
        assert_eq!(back.stage_times, snapshot.stage_times);
    }

    #[test]
    fn engine_counters_cover_framing() {
        let data = vec![7u8; 3000];
        let config = ApiConfig::serial().with_chunk_size(1000);
        let out = compress_with(&data[..], &CompressParams::new("abc", CompressionCodec::Huffman), &config).unwrap();
        let t = &out.telemetry;

        assert_eq!(t.chunks, 3);
        assert_eq!(t.bytes_input, 3000);
        // 8-byte header + 3-byte name, then one 4-byte prefix per chunk.
        assert_eq!(t.bytes_overhead, 11 + 3 * 4);
        assert_eq!(t.bytes_output + t.bytes_overhead, out.container.len() as u64);
        assert!(t.has_all_stages(&[Stage::Split, Stage::Compress, Stage::Encode]));
        assert!(t.sanity_check());

        let back = decompress_with(out.container.clone(), &config).unwrap();
        assert_eq!(back.telemetry.bytes_input, t.bytes_output);
        assert_eq!(back.telemetry.bytes_output, 3000);
        assert_eq!(back.telemetry.bytes_overhead, t.bytes_overhead);
    }
}
