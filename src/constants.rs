// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

// Container header
pub const HEADER_LENGTH: usize = 32;
pub const HASH_OFFSET: u64 = 16;
pub const HASH_LENGTH: usize = 16;

/// fixed tag ("AITS", version 1) followed by the zeroed checksum slot
pub const HEADER: [u8; HEADER_LENGTH] = [
    0x41, 0x49, 0x54, 0x53, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

// Device salt, also present verbatim in genuine firmware images
pub const SALT: &[u8; 8] = b"VDRAC999";
pub const SALT_OFFSET: u64 = 893400;
pub const MIN_INPUT_SIZE: u64 = SALT_OFFSET + SALT.len() as u64;

/// file name the camera looks for on the SD card
pub const DEFAULT_OUTPUT: &str = "SD_CarDV.bin";

/// returns the fixed tag part of the header
pub fn header_tag() -> &'static [u8] {
    &HEADER[..HASH_OFFSET as usize]
}
