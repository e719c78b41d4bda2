// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Forward-only reader over a borrowed byte buffer.

use super::error::DecodeError;
use crate::types::Pubkey;
use config::ByteOrder;

/// Reads primitives from a byte slice, advancing an offset.
///
/// Reads are all-or-nothing: a read that fails leaves the offset where it was.
#[derive(Debug, Clone)]
pub struct BinaryCursor<'a> {
    buf: &'a [u8],
    offset: usize,
    byte_order: ByteOrder,
}

macro_rules! read_numeric {
    ($($(#[$meta:meta])* $name:ident => $ty:ty, $width:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self) -> Result<$ty, DecodeError> {
                let bytes: [u8; $width] = self.take_array()?;
                Ok(match self.byte_order {
                    ByteOrder::Little => <$ty>::from_le_bytes(bytes),
                    ByteOrder::Big => <$ty>::from_be_bytes(bytes),
                })
            }
        )*
    };
}

impl<'a> BinaryCursor<'a> {
    /// Little-endian cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_byte_order(buf, ByteOrder::Little)
    }

    pub fn with_byte_order(buf: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            buf,
            offset: 0,
            byte_order,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Bytes not yet consumed, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Borrow `len` bytes starting `skip` bytes past the offset, without
    /// advancing. `needed` is what the whole read requires from the offset.
    fn peek(&self, skip: usize, len: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        let end = skip.checked_add(len).filter(|&end| end <= remaining);
        match end {
            Some(end) => Ok(&self.buf[self.offset + skip..self.offset + end]),
            None => Err(DecodeError::UnexpectedEof {
                needed: skip.saturating_add(len),
                remaining,
                offset: self.offset,
            }),
        }
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Consume exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.peek(0, n)?;
        self.offset += n;
        Ok(bytes)
    }

    /// Skip `n` bytes.
    pub fn advance(&mut self, n: usize) -> Result<(), DecodeError> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    read_numeric! {
        read_u16 => u16, 2;
        read_u32 => u32, 4;
        read_u64 => u64, 8;
        read_u128 => u128, 16;
        read_i16 => i16, 2;
        read_i32 => i32, 4;
        read_i64 => i64, 8;
        read_i128 => i128, 16;
        /// IEEE-754 single precision.
        read_f32 => f32, 4;
        /// IEEE-754 double precision.
        read_f64 => f64, 8;
    }

    /// `0x00` is false, `0x01` is true; anything else is rejected.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let byte = self.peek(0, 1)?[0];
        let value = match byte {
            0 => false,
            1 => true,
            _ => {
                return Err(DecodeError::InvalidBoolEncoding {
                    byte,
                    offset: self.offset,
                });
            }
        };
        self.offset += 1;
        Ok(value)
    }

    /// Unsigned integer of 1, 2 or 4 bytes, widened to u32. Used for enum tags.
    pub fn read_uint(&mut self, width: u8) -> Result<u32, DecodeError> {
        match width {
            1 => self.read_u8().map(u32::from),
            2 => self.read_u16().map(u32::from),
            _ => self.read_u32(),
        }
    }

    /// u32 length prefix followed by that many bytes of UTF-8.
    pub fn read_string(&mut self) -> Result<&'a str, DecodeError> {
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(self.peek(0, 4)?);
        let len = match self.byte_order {
            ByteOrder::Little => u32::from_le_bytes(prefix),
            ByteOrder::Big => u32::from_be_bytes(prefix),
        } as usize;

        let bytes = self.peek(4, len)?;
        let value = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
            offset: self.offset,
        })?;
        self.offset += 4 + len;
        Ok(value)
    }

    /// 32 raw bytes; no validation is applied.
    pub fn read_pubkey(&mut self) -> Result<Pubkey, DecodeError> {
        self.take_array::<{ Pubkey::LEN }>().map(Pubkey::from)
    }
}
