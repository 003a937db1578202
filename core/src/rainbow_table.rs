use std::{
    mem,
    slice::Iter,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, Sender},
    },
    thread,
    time::{Duration, Instant},
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::{prelude::*, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::{
    chain::RainbowChain,
    ctx::RainbowTableCtx,
    error::{RtgenError, RtgenResult},
    event::{Event, SimpleTableHandle},
    password::Password,
    scheduling::BatchIterator,
};

/// Measurements taken while generating a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Wall-clock time spent generating the table.
    pub elapsed: Duration,
    /// The number of worker threads used.
    pub threads: usize,
    /// The seed the startpoints were drawn from.
    pub seed: u64,
}

/// A simple rainbow table.
/// Chains are kept in the order of their index.
pub struct SimpleTable {
    /// The chains of the table.
    chains: Vec<RainbowChain>,
    /// The context.
    ctx: RainbowTableCtx,
    stats: GenerationStats,
}

impl SimpleTable {
    /// Creates a new simple rainbow table from a Vec.
    /// The chains must be made of valid startpoints and endpoints.
    pub fn from_vec(chains: Vec<RainbowChain>, ctx: RainbowTableCtx) -> Self {
        Self {
            chains,
            ctx,
            stats: GenerationStats::default(),
        }
    }

    /// Creates a new simple rainbow table, on a background thread.
    /// Returns an handle to get events related to the generation and to get the generated table.
    /// The context is checked before the thread is started.
    pub fn new_with_events(ctx: RainbowTableCtx) -> RtgenResult<SimpleTableHandle> {
        ctx.validate()?;

        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || Self::new_impl(ctx, Some(sender)));

        Ok(SimpleTableHandle { handle, receiver })
    }

    /// Creates a new simple rainbow table.
    pub fn new(ctx: RainbowTableCtx) -> RtgenResult<Self> {
        Self::new_impl(ctx, None)
    }

    /// Draws all the startpoints in index order, from a single seeded generator.
    /// The table storage is allocated once here and never grows afterwards.
    fn startpoints(ctx: &RainbowTableCtx, seed: u64) -> RtgenResult<Vec<RainbowChain>> {
        let chains_len = usize::try_from(ctx.m0).map_err(|_| {
            RtgenError::InvalidParameters(format!("{} chains do not fit in memory", ctx.m0))
        })?;

        let mut chains = Vec::new();
        chains.try_reserve_exact(chains_len)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        chains.extend((0..chains_len).map(|_| {
            RainbowChain::with_startpoint(Password::random(
                &mut rng,
                &ctx.charset,
                ctx.password_length,
            ))
        }));

        Ok(chains)
    }

    fn new_impl(ctx: RainbowTableCtx, events: Option<Sender<Event>>) -> RtgenResult<Self> {
        ctx.validate()?;
        let start = Instant::now();

        let mut pool_builder = ThreadPoolBuilder::new();
        if let Some(threads) = ctx.threads {
            pool_builder = pool_builder.num_threads(threads);
        }
        let pool = pool_builder.build()?;
        let threads = pool.current_num_threads();

        let seed = ctx.seed.unwrap_or_else(rand::random);
        let mut chains = Self::startpoints(&ctx, seed)?;

        info!(
            hash_function = %ctx.hash_function,
            chains = chains.len(),
            chain_length = ctx.t,
            threads,
            seed,
            "Generating rainbow table"
        );

        // give each batch its own disjoint slice of the table
        let batch_iter = BatchIterator::new(chains.len(), threads);
        let batch_count = batch_iter.len();
        let chains_len = chains.len();
        let mut remaining = chains.as_mut_slice();
        let mut batches = Vec::with_capacity(batch_count);
        for (batch_number, batch_info) in batch_iter.enumerate() {
            let (batch, rest) = mem::take(&mut remaining).split_at_mut(batch_info.range.len());
            remaining = rest;
            batches.push((batch_number, batch_info, batch));
        }

        let chains_done = AtomicUsize::new(0);

        pool.install(|| {
            batches.into_par_iter().for_each_with(
                events,
                |events, (batch_number, batch_info, batch)| {
                    debug!(batch_number, range = ?batch_info.range, "Computing batch");

                    for chain in batch.iter_mut() {
                        chain.compute(&ctx);
                    }

                    let done = chains_done.fetch_add(batch.len(), Ordering::Relaxed) + batch.len();

                    // the receiver may have been dropped, the generation goes on regardless
                    if let Some(sender) = events {
                        sender
                            .send(Event::Batch {
                                batch_number: batch_number + 1,
                                batch_count,
                                chains: batch_info.range,
                            })
                            .ok();
                        sender
                            .send(Event::Progress(done as f64 / chains_len as f64 * 100.))
                            .ok();
                    }
                },
            )
        });

        let stats = GenerationStats {
            elapsed: start.elapsed(),
            threads,
            seed,
        };

        info!(elapsed = ?stats.elapsed, "Rainbow table generated");

        Ok(Self { chains, ctx, stats })
    }

    /// Returns the number of chains stored in the table.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Returns an iterator over the chains of the table, in index order.
    pub fn iter(&self) -> Iter<'_, RainbowChain> {
        self.chains.iter()
    }

    pub fn chains(&self) -> &[RainbowChain] {
        &self.chains
    }

    /// Returns the context.
    pub fn ctx(&self) -> &RainbowTableCtx {
        &self.ctx
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a SimpleTable {
    type Item = &'a RainbowChain;
    type IntoIter = Iter<'a, RainbowChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for SimpleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chain in self.chains.iter().take(10) {
            write!(f, "{} -> ", chain.startpoint)?;
            for byte in &chain.endpoint {
                write!(f, "{byte:02x}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "...")
    }
}
