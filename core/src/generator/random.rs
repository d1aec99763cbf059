use super::*;

/// Uniformly random layout drawn from the session's random source.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RandomMinefieldGenerator;

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(
        &mut self,
        rng: &mut dyn RngCore,
        candidates: &[CellIndex],
        mines: usize,
    ) -> Result<Vec<CellIndex>> {
        if mines > candidates.len() {
            return Err(GameError::InitMineMap {
                mines: mines.try_into().unwrap_or(CellCount::MAX),
                available: candidates.len().try_into().unwrap_or(CellCount::MAX),
            });
        }

        let mut chosen: Vec<CellIndex> = rand::seq::index::sample(rng, candidates.len(), mines)
            .into_iter()
            .map(|i| candidates[i])
            .collect();
        chosen.sort_unstable();
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn picks_distinct_candidates() {
        let candidates: Vec<CellIndex> = (10..40).collect();
        let mut rng = SmallRng::seed_from_u64(7);

        let mines = RandomMinefieldGenerator
            .generate(&mut rng, &candidates, 12)
            .unwrap();

        assert_eq!(mines.len(), 12);
        assert!(mines.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(mines.iter().all(|mine| candidates.contains(mine)));
    }

    #[test]
    fn same_seed_same_layout() {
        let candidates: Vec<CellIndex> = (0..100).collect();
        let layout = |seed| {
            RandomMinefieldGenerator
                .generate(&mut SmallRng::seed_from_u64(seed), &candidates, 20)
                .unwrap()
        };

        assert_eq!(layout(3), layout(3));
    }

    #[test]
    fn rejects_more_mines_than_candidates() {
        let mut rng = SmallRng::seed_from_u64(0);

        let result = RandomMinefieldGenerator.generate(&mut rng, &[1, 2], 3);

        assert_eq!(
            result,
            Err(GameError::InitMineMap {
                mines: 3,
                available: 2
            })
        );
    }
}
