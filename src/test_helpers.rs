use crate::geom::V2;
use crate::im::MaskIm;
use crate::scan_path::ScanPath;

pub fn line(x0: f64, y0: f64, x1: f64, y1: f64, width: usize) -> ScanPath {
    ScanPath::Line {
        start: V2::new(x0, y0),
        end: V2::new(x1, y1),
        width,
    }
}

pub fn mask_to_ascii(mask: &MaskIm) -> String {
    let mut out = String::new();
    for y in 0..mask.h {
        for x in 0..mask.w {
            let v = mask.arr[y * mask.s + x];
            out.push(if v > 0 { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

pub fn mask_from_ascii(grid: &str) -> MaskIm {
    let rows: Vec<&str> = grid
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let h = rows.len();
    assert!(h > 0, "grid must have at least one non-empty row");
    let w = rows[0].len();
    for r in &rows {
        assert_eq!(r.len(), w, "all rows must have equal length");
    }

    let mut mask = MaskIm::new(w, h);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            mask.arr[y * mask.s + x] = match ch {
                '#' => 255,
                '.' => 0,
                _ => panic!("invalid mask char '{ch}', expected '#' or '.'"),
            };
        }
    }
    mask
}
