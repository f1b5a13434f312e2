//! Tramage par diffusion d'erreur (Floyd–Steinberg), quantification 1 bit.
//!
//! Seul l'intérieur du plan est traité : la dernière ligne, la première et la
//! dernière colonne gardent leur valeur tonale d'origine. La part d'erreur qui
//! tomberait sur ces cellules de bord est abandonnée.

/// Poids de diffusion (dx, dy, numérateur /16), dans l'ordre de parcours.
const KERNEL: [(isize, usize, f64); 4] = [(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)];

/// Floyd–Steinberg sur un plan `width`×`height` row-major.
///
/// Parcours strictement row-major ; chaque cellule intérieure est quantifiée
/// à 0 ou 255 (arrondi au pair le plus proche sur `old / 255`) et son erreur
/// est propagée aux voisins intérieurs pas encore visités. Les valeurs finales
/// sont tronquées en entiers.
///
/// # Example
/// ```
/// use gt_ascii::dither::floyd_steinberg;
/// let out = floyd_steinberg(&[10, 200, 30, 40, 50, 60], 3, 2);
/// assert_eq!(out, vec![10, 255, 30, 40, 50, 60]);
/// ```
#[must_use]
pub fn floyd_steinberg(samples: &[u8], width: usize, height: usize) -> Vec<i32> {
    debug_assert_eq!(samples.len(), width * height);
    let mut grid: Vec<f64> = samples.iter().map(|&v| f64::from(v)).collect();

    let is_interior = |x: usize, y: usize| y + 1 < height && x >= 1 && x + 1 < width;

    for y in 0..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let old = grid[idx];
            let new = (old / 255.0).round_ties_even() * 255.0;
            grid[idx] = new;
            let error = old - new;

            for &(dx, dy, weight) in &KERNEL {
                let tx = x.wrapping_add_signed(dx);
                let ty = y + dy;
                if is_interior(tx, ty) {
                    grid[ty * width + tx] += error * weight / 16.0;
                }
            }
        }
    }

    grid.into_iter().map(|v| v as i32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_output_4x3() {
        #[rustfmt::skip]
        let input = [
            100, 150, 200, 50,
             30, 120, 220, 80,
             10,  20,  30, 40,
        ];
        #[rustfmt::skip]
        let expected = vec![
            100, 255, 255, 50,
             30,   0, 255, 80,
             10,  20,  30, 40,
        ];
        assert_eq!(floyd_steinberg(&input, 4, 3), expected);
    }

    #[test]
    fn pinned_output_5x4_gradient() {
        let input: Vec<u8> = (0..4u32)
            .flat_map(|y| (0..5u32).map(move |x| ((x * 60 + y * 15) % 256) as u8))
            .collect();
        #[rustfmt::skip]
        let expected = vec![
             0,   0, 255, 255, 240,
            15,   0,   0, 255, 255,
            30, 255,   0, 255,  14,
            45, 105, 165, 225,  29,
        ];
        assert_eq!(floyd_steinberg(&input, 5, 4), expected);
    }

    #[test]
    fn boundary_cells_pass_through() {
        let (w, h) = (9usize, 7usize);
        let input: Vec<u8> = (0..w * h).map(|i| ((i * 37 + 11) % 256) as u8).collect();
        let out = floyd_steinberg(&input, w, h);
        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                if y == h - 1 || x == 0 || x == w - 1 {
                    assert_eq!(out[i], i32::from(input[i]), "bord modifié en ({x}, {y})");
                } else {
                    assert!(out[i] == 0 || out[i] == 255, "intérieur non binaire en ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn uniform_mid_gray_keeps_average_in_interior() {
        let (w, h) = (64usize, 64usize);
        let out = floyd_steinberg(&vec![128u8; w * h], w, h);
        let interior: Vec<i32> = (0..h - 1)
            .flat_map(|y| (1..w - 1).map(move |x| (x, y)))
            .map(|(x, y)| out[y * w + x])
            .collect();
        let mean = interior.iter().map(|&v| f64::from(v)).sum::<f64>() / interior.len() as f64;
        assert!((mean - 128.0).abs() < 4.0, "moyenne intérieure {mean}");
        assert!(interior.contains(&0) && interior.contains(&255));
    }

    #[test]
    fn degenerate_planes_are_untouched() {
        assert_eq!(floyd_steinberg(&[7, 200], 2, 1), vec![7, 200]);
        assert_eq!(floyd_steinberg(&[7, 200, 90], 1, 3), vec![7, 200, 90]);
        assert!(floyd_steinberg(&[], 0, 0).is_empty());
    }
}
