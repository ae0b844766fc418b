//! Round-trip property: composing parts with a fresh boundary and decoding
//! them recovers every part's metadata and bytes exactly.
//!
//! The crate is decode-only, so the composer lives here in the test.

#![allow(clippy::unwrap_used)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use proptest::prelude::*;

use mailroute_mime::unmarshal;

/// Chosen so it cannot collide with base64 content: the standard alphabet
/// contains neither `_` nor `-`, and no encoded line starts with `--`.
const BOUNDARY: &str = "=_rt_7f29c1";

fn compose(body_text: &str, attachments: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut out = String::new();

    out.push_str(&format!(
        "--{BOUNDARY}\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         Content-Transfer-Encoding: base64\r\n\
         \r\n\
         {}\r\n",
        STANDARD.encode(body_text.as_bytes())
    ));

    for (name, bytes) in attachments {
        out.push_str(&format!(
            "--{BOUNDARY}\r\n\
             Content-Type: application/octet-stream\r\n\
             Content-Transfer-Encoding: base64\r\n\
             Content-ID: <{name}>\r\n\
             \r\n\
             {}\r\n",
            STANDARD.encode(bytes)
        ));
    }

    out.push_str(&format!("--{BOUNDARY}--\r\n"));
    out.into_bytes()
}

fn outer_content_type() -> String {
    format!("multipart/related; type=\"text/plain\"; boundary=\"{BOUNDARY}\"")
}

proptest! {
    #[test]
    fn roundtrip_recovers_parts(
        body_text in "[ -~]{0,200}",
        raw_attachments in prop::collection::vec(
            ("[a-z][a-z0-9]{0,11}", prop::collection::vec(any::<u8>(), 0..256)),
            0..5,
        ),
    ) {
        // Suffix with the position so generated names never collide
        let attachments: Vec<(String, Vec<u8>)> = raw_attachments
            .into_iter()
            .enumerate()
            .map(|(i, (stem, bytes))| (format!("{stem}-{i}"), bytes))
            .collect();

        let composed = compose(&body_text, &attachments);
        let message = unmarshal(&composed, &outer_content_type()).unwrap();

        prop_assert_eq!(&message.content_type, "text/plain");
        prop_assert_eq!(&message.body, &body_text);
        prop_assert_eq!(message.attachments.len(), attachments.len());

        let names: Vec<&str> = attachments.iter().map(|(n, _)| n.as_str()).collect();
        prop_assert_eq!(message.attachments.names(), names);

        for (name, bytes) in &attachments {
            let attachment = message.attachments.get(name).unwrap();
            prop_assert_eq!(&attachment.bytes, bytes);
            prop_assert_eq!(&attachment.content_type, "application/octet-stream");
            prop_assert_eq!(attachment.content_id.as_deref(), Some(name.as_str()));
            prop_assert_eq!(attachment.filename.as_deref(), None);
        }
    }
}

#[test]
fn roundtrip_single_text_part() {
    let composed = compose("just the body", &[]);
    let message = unmarshal(&composed, &outer_content_type()).unwrap();
    assert_eq!(message.body, "just the body");
    assert!(message.attachments.is_empty());
}
