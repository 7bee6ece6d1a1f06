//! DEC sixel encoding.
//!
//! Colours are quantized to a fixed 6x6x6 cube so no palette search is
//! needed. Each band of six pixel rows is drawn once per colour present in
//! it, with `$` returning to the band's start between colours.

use image::RgbaImage;

/// Levels per channel in the colour cube
const LEVELS: u32 = 6;

const PALETTE_SIZE: usize = (LEVELS * LEVELS * LEVELS) as usize;

/// Pixels with alpha below this are left unpainted
const ALPHA_CUTOFF: u8 = 128;

/// Runs at least this long are written with the `!` repeat introducer
const MIN_REPEAT: usize = 4;

fn quantize(channel: u8) -> u32 {
    (u32::from(channel) * (LEVELS - 1) + 127) / 255
}

/// Palette index of the cube colour nearest to `rgb`
pub fn palette_index(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(quantize);
    (r * LEVELS * LEVELS + g * LEVELS + b) as u8
}

/// RGB of a palette entry as sixel percentages
fn palette_percentages(index: usize) -> (u32, u32, u32) {
    let index = index as u32;
    let level = |value: u32| value * 100 / (LEVELS - 1);
    (
        level(index / (LEVELS * LEVELS)),
        level((index / LEVELS) % LEVELS),
        level(index % LEVELS),
    )
}

/// Encode `image` as a complete sixel escape sequence.
pub fn encode(image: &RgbaImage) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let width = width as usize;
    let height = height as usize;

    let indices: Vec<Option<u8>> = image
        .pixels()
        .map(|p| (p[3] >= ALPHA_CUTOFF).then(|| palette_index([p[0], p[1], p[2]])))
        .collect();

    // DCS with P2=1 so unset pixels keep the terminal background
    let mut out = format!("\x1bP0;1;0q\"1;1;{};{}", width, height);

    let mut used = [false; PALETTE_SIZE];
    for index in indices.iter().flatten() {
        used[*index as usize] = true;
    }
    for (index, _) in used.iter().enumerate().filter(|(_, present)| **present) {
        let (r, g, b) = palette_percentages(index);
        out.push_str(&format!("#{};2;{};{};{}", index, r, g, b));
    }

    for band_top in (0..height).step_by(6) {
        let band_rows = (height - band_top).min(6);

        let mut in_band = [false; PALETTE_SIZE];
        for row in band_top..band_top + band_rows {
            for index in indices[row * width..(row + 1) * width].iter().flatten() {
                in_band[*index as usize] = true;
            }
        }

        for (colour, _) in in_band.iter().enumerate().filter(|(_, present)| **present) {
            out.push_str(&format!("#{}", colour));

            let mut run = Run::default();
            for x in 0..width {
                let mut bits = 0u8;
                for dy in 0..band_rows {
                    if indices[(band_top + dy) * width + x] == Some(colour as u8) {
                        bits |= 1 << dy;
                    }
                }
                run.push(char::from(63 + bits), &mut out);
            }
            run.flush(&mut out);
            out.push('$');
        }

        if band_top + 6 < height {
            out.push('-');
        }
    }

    out.push_str("\x1b\\");
    out.into_bytes()
}

/// Run-length state for one colour row of a band
#[derive(Default)]
struct Run {
    current: Option<char>,
    length: usize,
}

impl Run {
    fn push(&mut self, ch: char, out: &mut String) {
        if self.current == Some(ch) {
            self.length += 1;
            return;
        }
        self.flush(out);
        self.current = Some(ch);
        self.length = 1;
    }

    fn flush(&mut self, out: &mut String) {
        let Some(ch) = self.current.take() else {
            return;
        };
        if self.length >= MIN_REPEAT {
            out.push_str(&format!("!{}{}", self.length, ch));
        } else {
            out.extend(std::iter::repeat(ch).take(self.length));
        }
        self.length = 0;
    }
}
