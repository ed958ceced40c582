use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::AudioError;

const FORMAT_PCM: u16 = 1;
const FORMAT_IEEE_FLOAT: u16 = 3;
const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Decoded audio: the first channel's samples scaled to `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    /// Channel count of the source file. Only channel 0 is kept in `samples`.
    pub channels: u16,
}

impl AudioData {
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Contents of the `fmt ` chunk that matter for decoding.
#[derive(Debug, Clone, Copy)]
struct FormatChunk {
    format: u16,
    channels: u16,
    sample_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
}

/// Reads a WAV file from disk and decodes its first channel.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<AudioData, AudioError> {
    let bytes = fs::read(path)?;
    load_wav_bytes(&bytes)
}

/// Decodes an in-memory WAV container.
pub fn load_wav_bytes(bytes: &[u8]) -> Result<AudioData, AudioError> {
    if bytes.len() < 12 {
        return Err(AudioError::InvalidHeader("file too small".into()));
    }

    let mut rdr = Cursor::new(bytes);
    let mut chunk_id = [0u8; 4];
    rdr.read_exact(&mut chunk_id)?;
    let _riff_size = rdr.read_u32::<LittleEndian>()?;
    let mut format = [0u8; 4];
    rdr.read_exact(&mut format)?;
    if &chunk_id != b"RIFF" || &format != b"WAVE" {
        return Err(AudioError::InvalidHeader("not a RIFF/WAVE container".into()));
    }

    let mut fmt: Option<FormatChunk> = None;
    let mut data: Option<&[u8]> = None;

    while (rdr.position() as usize) + 8 <= bytes.len() {
        let mut id = [0u8; 4];
        rdr.read_exact(&mut id)?;
        let size = rdr.read_u32::<LittleEndian>()? as usize;
        let start = rdr.position() as usize;
        // Streaming writers may leave the size at its maximum.
        let end = start.saturating_add(size).min(bytes.len());

        match &id {
            b"fmt " => fmt = Some(parse_format(&bytes[start..end])?),
            b"data" => data = Some(&bytes[start..end]),
            _ => {}
        }

        // Chunks are word aligned.
        let next = end + (size & 1);
        rdr.set_position(next as u64);
    }

    let fmt = fmt.ok_or(AudioError::MissingChunk("fmt "))?;
    let data = data.ok_or(AudioError::MissingChunk("data"))?;
    let samples = decode_first_channel(data, &fmt)?;

    Ok(AudioData {
        samples,
        sample_rate: fmt.sample_rate,
        channels: fmt.channels,
    })
}

fn parse_format(chunk: &[u8]) -> Result<FormatChunk, AudioError> {
    if chunk.len() < 16 {
        return Err(AudioError::InvalidHeader("fmt chunk too short".into()));
    }

    let mut rdr = Cursor::new(chunk);
    let mut format = rdr.read_u16::<LittleEndian>()?;
    let channels = rdr.read_u16::<LittleEndian>()?;
    let sample_rate = rdr.read_u32::<LittleEndian>()?;
    let _bytes_per_sec = rdr.read_u32::<LittleEndian>()?;
    let block_align = rdr.read_u16::<LittleEndian>()?;
    let bits_per_sample = rdr.read_u16::<LittleEndian>()?;

    if format == FORMAT_EXTENSIBLE {
        // The sub-format GUID starts at byte 24; its first two bytes hold the real format code.
        if chunk.len() < 26 {
            return Err(AudioError::InvalidHeader("extensible fmt chunk too short".into()));
        }
        rdr.set_position(24);
        format = rdr.read_u16::<LittleEndian>()?;
    }

    if channels == 0 {
        return Err(AudioError::InvalidHeader("zero channels".into()));
    }
    let bytes_per_sample = (bits_per_sample as usize).div_ceil(8);
    if block_align == 0 || (block_align as usize) < bytes_per_sample {
        return Err(AudioError::InvalidHeader(format!("invalid block align {}", block_align)));
    }

    Ok(FormatChunk {
        format,
        channels,
        sample_rate,
        block_align,
        bits_per_sample,
    })
}

/// Decodes the first sample of every frame in the data chunk. A trailing
/// partial frame is ignored.
fn decode_first_channel(data: &[u8], fmt: &FormatChunk) -> Result<Vec<f64>, AudioError> {
    let frame_size = fmt.block_align as usize;
    let mut output = Vec::with_capacity(data.len() / frame_size);

    for frame in data.chunks_exact(frame_size) {
        let mut rdr = Cursor::new(frame);
        let sample = match (fmt.format, fmt.bits_per_sample) {
            (FORMAT_PCM, 8) => (rdr.read_u8()? as f64 - 128.0) / 128.0,
            (FORMAT_PCM, 16) => rdr.read_i16::<LittleEndian>()? as f64 / 32768.0,
            (FORMAT_PCM, 24) => rdr.read_i24::<LittleEndian>()? as f64 / 8_388_608.0,
            (FORMAT_PCM, 32) => rdr.read_i32::<LittleEndian>()? as f64 / 2_147_483_648.0,
            (FORMAT_IEEE_FLOAT, 32) => rdr.read_f32::<LittleEndian>()? as f64,
            (FORMAT_IEEE_FLOAT, 64) => rdr.read_f64::<LittleEndian>()?,
            (format, bits) => {
                return Err(AudioError::UnsupportedFormat(format!(
                    "format code {} with {} bits per sample",
                    format, bits
                )));
            }
        };
        output.push(sample);
    }

    Ok(output)
}
