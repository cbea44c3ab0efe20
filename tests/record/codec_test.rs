/*!
 * Record Codec Tests
 * Wire round-trips and rejection of non-serializable variants
 */

use flow_record::record::codec::{from_bytes, to_bytes};
use flow_record::{
    deserialize_record, serialize_record, BufferReader, BufferWriter, BytesReader, BytesWriter,
    ExecutionContext, KeyHandle, Record, RecordError, RecordType,
};
use pretty_assertions::assert_eq;

struct NoopHandle;

impl KeyHandle for NoopHandle {
    fn name(&self) -> &[u8] {
        b"noop"
    }

    fn close(self: Box<Self>) {}
}

fn round_trip(ctx: &ExecutionContext, record: &Record) -> Record {
    let mut writer = BytesWriter::new();
    serialize_record(&mut writer, record).unwrap();
    let mut reader = BytesReader::new(writer.freeze());
    let decoded = deserialize_record(ctx, &mut reader).unwrap();
    assert_eq!(reader.remaining(), 0);
    decoded
}

#[test]
fn test_key_with_string_value() {
    let ctx = ExecutionContext::default();
    let key = ctx.key_with("k", Some(ctx.string("v").unwrap())).unwrap();

    let decoded = round_trip(&ctx, &key);
    assert_eq!(decoded.record_type(), RecordType::Key);
    assert_eq!(decoded.key_name().unwrap(), Some("k"));
    assert_eq!(decoded.key_value().unwrap().unwrap().string().unwrap(), b"v");
    assert_eq!(decoded, key);
}

#[test]
fn test_list_of_longs_keeps_order() {
    let ctx = ExecutionContext::default();
    let mut list = ctx.list().unwrap();
    for i in 1..=3 {
        list.list_push(ctx.long(i).unwrap()).unwrap();
    }

    let decoded = round_trip(&ctx, &list);
    assert_eq!(decoded.list_len().unwrap(), 3);
    let values: Vec<i64> = decoded
        .list_iter()
        .unwrap()
        .map(|r| r.long().unwrap())
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_binary_string_is_byte_exact() {
    let ctx = ExecutionContext::default();
    let payload = vec![0u8, 255, 0, 10, 13];
    let decoded = round_trip(&ctx, &ctx.string(payload.clone()).unwrap());
    assert_eq!(decoded.string().unwrap(), payload.as_slice());
    assert_eq!(decoded.string_len().unwrap(), payload.len());
}

#[test]
fn test_scalars_round_trip() {
    let ctx = ExecutionContext::default();
    assert_eq!(round_trip(&ctx, &ctx.long(i64::MIN).unwrap()).long().unwrap(), i64::MIN);
    assert_eq!(
        round_trip(&ctx, &ctx.double(1.0e-300).unwrap()).double().unwrap(),
        1.0e-300
    );
}

#[test]
fn test_hash_set_is_not_serializable() {
    let ctx = ExecutionContext::default();
    let mut set = ctx.hash_set().unwrap();
    set.hash_set_set("a", ctx.long(1).unwrap()).unwrap();

    let mut writer = BytesWriter::new();
    assert_eq!(
        serialize_record(&mut writer, &set).unwrap_err(),
        RecordError::NotSerializable(RecordType::HashSet)
    );
    assert!(writer.is_empty());
}

#[test]
fn test_key_handler_is_not_serializable() {
    let ctx = ExecutionContext::default();
    let handler = ctx.key_handler(Box::new(NoopHandle)).unwrap();
    assert!(!handler.is_serializable());

    let mut writer = BytesWriter::new();
    assert_eq!(
        serialize_record(&mut writer, &handler).unwrap_err(),
        RecordError::NotSerializable(RecordType::KeyHandler)
    );
}

#[test]
fn test_nested_non_serializable_child_is_detected() {
    let ctx = ExecutionContext::default();
    let mut list = ctx.list().unwrap();
    list.list_push(ctx.long(1).unwrap()).unwrap();
    list.list_push(ctx.hash_set().unwrap()).unwrap();

    let mut writer = BytesWriter::new();
    assert!(matches!(
        serialize_record(&mut writer, &list),
        Err(RecordError::NotSerializable(RecordType::HashSet))
    ));
}

#[test]
fn test_hash_set_tag_is_rejected_on_decode() {
    let ctx = ExecutionContext::default();
    let mut writer = BytesWriter::new();
    writer.write_long(RecordType::HashSet.tag());

    let mut reader = BytesReader::new(writer.freeze());
    assert_eq!(
        deserialize_record(&ctx, &mut reader).unwrap_err(),
        RecordError::NotSerializable(RecordType::HashSet)
    );
}

#[test]
fn test_decoded_records_use_active_strategy() {
    let runtime = std::sync::Arc::new(flow_record::SharedObjectRuntime::new("worker"));
    let mut ctx = ExecutionContext::default().with_foreign_runtime(runtime.clone());
    let bytes = to_bytes(&ctx.key_with("k", Some(ctx.long(1).unwrap())).unwrap()).unwrap();

    ctx.set_strategy(flow_record::StrategyProfile::ForeignManaged)
        .unwrap();
    let decoded = from_bytes(&ctx, &bytes).unwrap();
    assert_eq!(decoded.profile(), flow_record::StrategyProfile::ForeignManaged);
    assert_eq!(runtime.stats().live_nodes(), 2);

    drop(decoded);
    assert!(runtime.stats().snapshot().is_balanced());
}

#[test]
fn test_key_names_accepted_by_encoder_decode_back() {
    let ctx = ExecutionContext::default();
    let key = ctx.key_with("ключ \u{1F511} tab\t", Some(ctx.long(1).unwrap())).unwrap();
    let decoded = from_bytes(&ctx, &to_bytes(&key).unwrap()).unwrap();
    assert_eq!(decoded, key);
}

#[test]
fn test_key_name_with_nul_never_reaches_the_wire() {
    let ctx = ExecutionContext::default();
    assert_eq!(
        ctx.key_with("a\0b", None).unwrap_err(),
        RecordError::InvalidKeyName("a\0b".to_string())
    );

    let mut key = ctx.key_with("a", None).unwrap();
    assert!(key.set_key_name("a\0b").is_err());
    let decoded = from_bytes(&ctx, &to_bytes(&key).unwrap()).unwrap();
    assert_eq!(decoded.key_name().unwrap(), Some("a"));
}

#[test]
fn test_trailing_payload_bytes_are_rejected() {
    let ctx = ExecutionContext::default();
    let mut writer = BytesWriter::new();
    serialize_record(&mut writer, &ctx.long(7).unwrap()).unwrap();
    writer.write_long(0x5eed);
    let framed = flow_record::core::serialization::frame(&writer.freeze()).unwrap();

    assert_eq!(
        from_bytes(&ctx, &framed).unwrap_err(),
        RecordError::TrailingBytes { remaining: 8 }
    );
}
