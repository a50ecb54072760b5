//! Crop and tile shuffle

use crate::FilterResult;
use bmpfx_core::Raster;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

/// Shrink a raster to at most `width` x `height`, keeping the top-left
/// corner. Each axis is clamped independently; the raster never grows.
pub fn crop(raster: &mut Raster, width: usize, height: usize) {
    raster.crop(width, height);
}

/// Split a raster into `side` x `side` equal tiles and swap them in random
/// pairs.
///
/// Rows and columns that do not divide evenly by `side` are cropped off the
/// bottom and right first. The tile list is shuffled and consecutive tiles
/// are swapped two at a time until fewer than two remain. Does nothing if
/// `side` is zero or not smaller than both dimensions.
pub fn shuffle_tiles<R: Rng + ?Sized>(
    raster: &mut Raster,
    side: usize,
    rng: &mut R,
) -> FilterResult<()> {
    if side == 0 || side >= raster.height().min(raster.width()) {
        return Ok(());
    }

    let width = raster.width() - raster.width() % side;
    let height = raster.height() - raster.height() % side;
    crop(raster, width, height);

    let tile_width = width / side;
    let tile_height = height / side;

    let mut corners: Vec<(usize, usize)> = (0..side)
        .flat_map(|ty| (0..side).map(move |tx| (tx * tile_width, ty * tile_height)))
        .collect();
    corners.shuffle(rng);

    for pair in corners.chunks_exact(2) {
        trace!(a = ?pair[0], b = ?pair[1], "swapping tiles");
        raster.swap_blocks(pair[0], pair[1], tile_width, tile_height)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmpfx_core::Pixel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tiled(side: usize, tile: usize) -> Raster {
        // every pixel carries its tile index in the red channel
        Raster::from_fn(side * tile, side * tile, |x, y| {
            Pixel::new((y / tile * side + x / tile) as u8, 0, 0)
        })
    }

    fn tile_ids(raster: &Raster, side: usize, tile: usize) -> Vec<u8> {
        let mut ids = Vec::new();
        for ty in 0..side {
            for tx in 0..side {
                let id = raster.pixel(tx * tile, ty * tile).r;
                // tiles move as a whole
                for y in 0..tile {
                    for x in 0..tile {
                        assert_eq!(raster.pixel(tx * tile + x, ty * tile + y).r, id);
                    }
                }
                ids.push(id);
            }
        }
        ids
    }

    #[test]
    fn test_single_piece_is_noop() {
        let mut raster = tiled(3, 2);
        let before = raster.clone();
        shuffle_tiles(&mut raster, 1, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(raster, before);
    }

    #[test]
    fn test_side_not_smaller_than_raster_is_noop() {
        let mut raster = Raster::from_fn(3, 5, |x, y| Pixel::gray((x + y) as u8));
        let before = raster.clone();
        shuffle_tiles(&mut raster, 3, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(raster, before);
    }

    #[test]
    fn test_crops_remainder() {
        let mut raster = Raster::new(7, 5);
        shuffle_tiles(&mut raster, 2, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!((raster.width(), raster.height()), (6, 4));
    }

    #[test]
    fn test_tiles_are_permuted_in_pairs() {
        let (side, tile) = (4, 3);
        let mut raster = tiled(side, tile);
        shuffle_tiles(&mut raster, side, &mut StdRng::seed_from_u64(42)).unwrap();

        let ids = tile_ids(&raster, side, tile);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<u8>>());

        // 16 tiles form 8 swapped pairs: the permutation is an involution
        // with no fixed points.
        for (pos, &id) in ids.iter().enumerate() {
            assert_ne!(pos, id as usize);
            assert_eq!(ids[id as usize] as usize, pos);
        }
    }

    #[test]
    fn test_odd_tile_count_leaves_one_in_place() {
        let (side, tile) = (3, 2);
        let mut raster = tiled(side, tile);
        shuffle_tiles(&mut raster, side, &mut StdRng::seed_from_u64(7)).unwrap();
        let ids = tile_ids(&raster, side, tile);
        let fixed = ids.iter().enumerate().filter(|&(p, &id)| p == id as usize).count();
        assert_eq!(fixed, 1);
    }

    #[test]
    fn test_same_seed_same_result() {
        let mut a = tiled(4, 2);
        let mut b = a.clone();
        shuffle_tiles(&mut a, 4, &mut StdRng::seed_from_u64(9)).unwrap();
        shuffle_tiles(&mut b, 4, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
