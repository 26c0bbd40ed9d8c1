use pixel_stash::codec::{self, CodecError, MAX_PAYLOAD_LEN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_frame(rng: &mut StdRng) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let name_len = rng.gen_range(0..=255usize);
    let payload_len = rng.gen_range(0..2048usize);
    let slack = rng.gen_range(0..64usize);

    let name: Vec<u8> = (0..name_len).map(|_| rng.gen()).collect();
    let payload: Vec<u8> = (0..payload_len).map(|_| rng.gen()).collect();
    let mut carrier = vec![0u8; codec::required_carrier_len(name_len, payload_len) + slack];
    rng.fill(&mut carrier[..]);

    (name, payload, carrier)
}

#[test]
fn test_random_round_trips() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..200 {
        let (name, payload, mut carrier) = random_frame(&mut rng);
        let original = carrier.clone();

        let end = codec::encode(&mut carrier, &name, &payload).unwrap();
        let frame = codec::decode(&carrier).unwrap();

        assert_eq!(frame.name, name);
        assert_eq!(frame.payload, payload);

        // Only the LSBs of the written region may change.
        for (before, after) in original[..end].iter().zip(&carrier[..end]) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
        assert_eq!(original[end..], carrier[end..]);
    }
}

#[test]
fn test_encode_into_slice_of_larger_buffer() {
    let mut pixels = vec![0x80u8; 512];
    let (head, tail) = pixels.split_at_mut(256);

    codec::encode(head, b"f", b"abc").unwrap();
    assert!(tail.iter().all(|&b| b == 0x80));

    let frame = codec::decode(&pixels[..256]).unwrap();
    assert_eq!(frame.file_name(), "f");
    assert_eq!(frame.payload, b"abc");
}

#[test]
fn test_rejected_encode_leaves_carrier_untouched() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut carrier = vec![0u8; 200];
    rng.fill(&mut carrier[..]);
    let original = carrier.clone();

    let payload = vec![1u8; 30];
    assert!(matches!(
        codec::encode(&mut carrier, b"name.bin", &payload),
        Err(CodecError::CarrierTooSmall { .. })
    ));
    assert_eq!(carrier, original);
}

#[test]
fn test_truncated_carrier_never_panics() {
    let mut carrier = vec![0u8; 88];
    codec::encode(&mut carrier, b"a.txt", b"hi").unwrap();

    for len in 0..88 {
        assert!(
            matches!(
                codec::decode(&carrier[..len]),
                Err(CodecError::TruncatedData { .. })
            ),
            "prefix of {} bytes decoded",
            len
        );
    }
}

#[test]
#[ignore = "allocates a 128 MiB carrier"]
fn test_max_payload_fits() {
    let payload = vec![0xA5u8; MAX_PAYLOAD_LEN];
    let mut carrier = vec![0u8; codec::required_carrier_len(0, MAX_PAYLOAD_LEN)];

    codec::encode(&mut carrier, b"", &payload).unwrap();
    let frame = codec::decode(&carrier).unwrap();
    assert_eq!(frame.payload.len(), MAX_PAYLOAD_LEN);
    assert!(frame.payload.iter().all(|&b| b == 0xA5));
}
