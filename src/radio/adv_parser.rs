//! BLE advertisement (AD structure) parsing for the network scanner.

use heapless::String;

/// AD type: Shortened Local Name.
const AD_SHORT_NAME: u8 = 0x08;
/// AD type: Complete Local Name.
const AD_COMPLETE_NAME: u8 = 0x09;
/// AD type: TX Power Level.
const AD_TX_POWER: u8 = 0x0A;

/// Iterate over `(ad_type, payload)` pairs, stopping at the first
/// malformed length.
fn ad_structures(data: &[u8]) -> impl Iterator<Item = (u8, &[u8])> {
    let mut i = 0;
    core::iter::from_fn(move || {
        let len = *data.get(i)? as usize;
        if len == 0 || i + len >= data.len() {
            return None;
        }
        let item = (data[i + 1], &data[i + 2..i + 1 + len]);
        i += len + 1;
        Some(item)
    })
}

/// Extract the complete (preferred) or shortened local name.
///
/// Non-printable bytes become `?`; names longer than 32 bytes are cut.
pub fn extract_device_name(data: &[u8]) -> Option<String<32>> {
    let mut short = None;
    for (ad_type, payload) in ad_structures(data) {
        match ad_type {
            AD_COMPLETE_NAME => return Some(printable(payload)),
            AD_SHORT_NAME if short.is_none() => short = Some(printable(payload)),
            _ => {}
        }
    }
    short
}

/// Advertised TX power in dBm, if present.
pub fn extract_tx_power(data: &[u8]) -> Option<i8> {
    ad_structures(data)
        .find(|(ad_type, payload)| *ad_type == AD_TX_POWER && !payload.is_empty())
        .map(|(_, payload)| payload[0] as i8)
}

/// Fallback label for nameless advertisers: the last three address bytes.
pub fn address_label(addr: &[u8; 6]) -> String<32> {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut s = String::new();
    // Little-endian on air: the most significant byte is last.
    for (n, b) in addr[..3].iter().rev().enumerate() {
        if n > 0 {
            let _ = s.push(':');
        }
        let _ = s.push(HEX[(b >> 4) as usize] as char);
        let _ = s.push(HEX[(b & 0x0F) as usize] as char);
    }
    s
}

fn printable(bytes: &[u8]) -> String<32> {
    let mut name = String::new();
    for &b in bytes {
        let c = if (0x20..0x7F).contains(&b) { b as char } else { '?' };
        if name.push(c).is_err() {
            break;
        }
    }
    name
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_complete_local_name() {
        // AD structure: len=9, type=0x09 (Complete Local Name), "Keyboard"
        let ad_data = [
            0x09, 0x09, // len=9, type=0x09
            b'K', b'e', b'y', b'b', b'o', b'a', b'r', b'd',
        ];
        let name = extract_device_name(&ad_data).unwrap();
        assert_eq!(name.as_str(), "Keyboard");
    }

    #[test]
    fn complete_name_wins_over_shortened() {
        let ad_data = [
            0x03, 0x08, b'B', b'T', // Shortened "BT"
            0x05, 0x09, b'B', b'T', b'-', b'1', // Complete "BT-1"
        ];
        assert_eq!(extract_device_name(&ad_data).unwrap().as_str(), "BT-1");
    }

    #[test]
    fn extract_shortened_local_name() {
        let ad_data = [
            0x05, 0x08, // len=5, type=0x08
            b'B', b'T', b' ', b'K',
        ];
        assert_eq!(extract_device_name(&ad_data).unwrap().as_str(), "BT K");
    }

    #[test]
    fn no_name_in_advertisement() {
        // Only flags, no name
        let ad_data = [0x02, 0x01, 0x06];
        assert!(extract_device_name(&ad_data).is_none());
    }

    #[test]
    fn malformed_length_stops_parsing() {
        assert!(extract_device_name(&[0x00, 0x09, b'A']).is_none());
        assert!(extract_device_name(&[0x09, 0x09, b'A']).is_none());
        assert!(extract_device_name(&[]).is_none());
    }

    #[test]
    fn name_truncated_to_32_chars() {
        let mut ad_data = [0u8; 40];
        ad_data[0] = 35; // len
        ad_data[1] = 0x09; // Complete Local Name
        for b in ad_data.iter_mut().take(37).skip(2) {
            *b = b'X';
        }
        let name = extract_device_name(&ad_data).unwrap();
        assert_eq!(name.len(), 32);
    }

    #[test]
    fn control_bytes_are_replaced() {
        let ad_data = [0x04, 0x09, b'a', 0x01, b'b'];
        assert_eq!(extract_device_name(&ad_data).unwrap().as_str(), "a?b");
    }

    #[test]
    fn tx_power_is_signed() {
        let ad_data = [0x02, 0x01, 0x06, 0x02, 0x0A, 0xF4];
        assert_eq!(extract_tx_power(&ad_data), Some(-12));
        assert_eq!(extract_tx_power(&[0x02, 0x01, 0x06]), None);
    }

    #[test]
    fn address_label_shows_low_bytes_msb_first() {
        let addr = [0x01, 0x02, 0xAB, 0x04, 0x05, 0x06];
        assert_eq!(address_label(&addr).as_str(), "AB:02:01");
    }
}
