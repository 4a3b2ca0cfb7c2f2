use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::RandomSource;

/// Недетерминированный источник: каждый вызов берёт `thread_rng`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn index(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Детерминированный RNG для тестов и воспроизведения.
/// Одинаковый seed -> одинаковые перетасовки и одинаковые шузы.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::from_seed(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}

/// Источник, выбранный конфигурацией: с seed или без.
#[derive(Clone, Debug)]
pub enum ShoeRng {
    Seeded(DeterministicRng),
    System(SystemRng),
}

impl ShoeRng {
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => ShoeRng::Seeded(crate::infra::RngSeed::from_u64(s).to_rng()),
            None => ShoeRng::System(SystemRng),
        }
    }
}

impl RandomSource for ShoeRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            ShoeRng::Seeded(rng) => rng.shuffle(slice),
            ShoeRng::System(rng) => rng.shuffle(slice),
        }
    }

    fn index(&mut self, upper: usize) -> usize {
        match self {
            ShoeRng::Seeded(rng) => rng.index(upper),
            ShoeRng::System(rng) => rng.index(upper),
        }
    }
}
