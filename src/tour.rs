//! Tour pipeline: group partitioning, distance matrices, the solver boundary and
//! the cached results.
//!
//! A tour is computed only on explicit request. Each tourable group with more than
//! two members is handed to a [`TourSolver`] as a symmetric distance matrix; the
//! returned permutation is validated and cached together with the IDs of the
//! members it indexes into. Any mutation that touches a group must call
//! [`TourCache::invalidate`] so a stale tour is never served.

use crate::constants::{
    TOUR_AUTO_ADVANCE, TOUR_ELITE_COUNT, TOUR_MAX_GENERATIONS, TOUR_MUTATION_RATE,
    TOUR_POPULATION_SIZE,
};
use crate::error::{EditorError, EditorResult};
use crate::types::{distance, ColorTag, PointId, PointStore, TourGroup};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Fixed run configuration handed to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverBudget {
    /// Maximum number of generations (iterations) the heuristic may run
    pub max_generations: u32,
    /// Run to the full budget in one call rather than one step per call
    pub auto_advance: bool,
}

impl Default for SolverBudget {
    fn default() -> Self {
        Self {
            max_generations: TOUR_MAX_GENERATIONS,
            auto_advance: TOUR_AUTO_ADVANCE,
        }
    }
}

/// Square, symmetric matrix of pairwise Euclidean distances in grid units.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the full pairwise matrix for the given positions.
    pub fn from_positions(positions: &[(f64, f64)]) -> Self {
        let size = positions.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = distance(positions[i], positions[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }
        Self { size, values }
    }

    /// Number of items (rows and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance between items `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Length of the closed tour visiting items in `order`, including the edge
    /// from the last item back to the first.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let open: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
        open + self.get(order[order.len() - 1], order[0])
    }
}

/// External tour-ordering capability.
///
/// Implementations receive a matrix over `n >= 3` items and return an ordering of
/// `0..n` that approximately minimizes the closed tour length. The call is
/// blocking and runs until the budget is exhausted.
pub trait TourSolver: Send + Sync {
    /// Orders the items of `distances` into a short closed tour.
    fn solve(&self, distances: &DistanceMatrix, budget: &SolverBudget) -> Vec<usize>;
}

/// Genetic-algorithm tour heuristic.
///
/// Evolves a population of random tours with order crossover, inversion mutation
/// and elitism. With `auto_advance` the whole generation budget runs in one call;
/// without it each call advances a single generation.
#[derive(Debug, Clone)]
pub struct GeneticTourSolver {
    /// Number of tours kept per generation
    pub population_size: usize,
    /// Probability that a child is mutated
    pub mutation_rate: f64,
    /// Number of best tours carried over unchanged
    pub elite_count: usize,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GeneticTourSolver {
    fn default() -> Self {
        Self {
            population_size: TOUR_POPULATION_SIZE,
            mutation_rate: TOUR_MUTATION_RATE,
            elite_count: TOUR_ELITE_COUNT,
            seed: None,
        }
    }
}

impl GeneticTourSolver {
    /// Creates a solver with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn next_generation(
        &self,
        population: &[Vec<usize>],
        distances: &DistanceMatrix,
        rng: &mut StdRng,
    ) -> Vec<Vec<usize>> {
        let mut scored: Vec<(f64, &Vec<usize>)> = population
            .iter()
            .map(|tour| (distances.tour_length(tour), tour))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut next: Vec<Vec<usize>> = scored
            .iter()
            .take(self.elite_count.min(scored.len()))
            .map(|(_, tour)| (*tour).clone())
            .collect();

        while next.len() < population.len() {
            let mother = tournament(&scored, rng);
            let father = tournament(&scored, rng);
            let mut child = order_crossover(mother, father, rng);
            if rng.random_bool(self.mutation_rate.clamp(0.0, 1.0)) {
                invert_segment(&mut child, rng);
            }
            next.push(child);
        }
        next
    }
}

impl TourSolver for GeneticTourSolver {
    fn solve(&self, distances: &DistanceMatrix, budget: &SolverBudget) -> Vec<usize> {
        let n = distances.size();
        if n < 4 {
            // Every cyclic order of three or fewer items has the same length.
            return (0..n).collect();
        }

        let mut rng = self.rng();
        let mut population: Vec<Vec<usize>> = (0..self.population_size.max(2))
            .map(|_| {
                let mut tour: Vec<usize> = (0..n).collect();
                tour.shuffle(&mut rng);
                tour
            })
            .collect();

        let generations = if budget.auto_advance {
            budget.max_generations
        } else {
            1
        };
        for _ in 0..generations {
            population = self.next_generation(&population, distances, &mut rng);
        }

        population
            .into_iter()
            .min_by(|a, b| distances.tour_length(a).total_cmp(&distances.tour_length(b)))
            .unwrap_or_else(|| (0..n).collect())
    }
}

/// Picks the shortest of three random tours.
fn tournament<'a>(scored: &[(f64, &'a Vec<usize>)], rng: &mut StdRng) -> &'a Vec<usize> {
    let mut best = &scored[rng.random_range(0..scored.len())];
    for _ in 0..2 {
        let candidate = &scored[rng.random_range(0..scored.len())];
        if candidate.0 < best.0 {
            best = candidate;
        }
    }
    best.1
}

/// Order crossover (OX1): copies a random slice of `mother`, then fills the
/// remaining positions with the missing items in the order they appear in `father`.
fn order_crossover(mother: &[usize], father: &[usize], rng: &mut StdRng) -> Vec<usize> {
    let n = mother.len();
    let mut start = rng.random_range(0..n);
    let mut end = rng.random_range(0..n);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let mut child = vec![0; n];
    let mut taken = vec![false; n];
    for k in start..=end {
        child[k] = mother[k];
        taken[mother[k]] = true;
    }

    let mut fill = (end + 1) % n;
    for offset in 0..n {
        let gene = father[(end + 1 + offset) % n];
        if !taken[gene] {
            child[fill] = gene;
            taken[gene] = true;
            fill = (fill + 1) % n;
        }
    }
    child
}

/// Reverses a random contiguous segment of the tour (a 2-opt move).
fn invert_segment(tour: &mut [usize], rng: &mut StdRng) {
    let n = tour.len();
    let mut start = rng.random_range(0..n);
    let mut end = rng.random_range(0..n);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    tour[start..=end].reverse();
}

/// Checks that `order` is a permutation of `0..n`.
pub fn validate_permutation(order: &[usize], n: usize) -> Result<(), String> {
    if order.len() != n {
        return Err(format!("expected {n} indices, got {}", order.len()));
    }
    let mut seen = vec![false; n];
    for &index in order {
        if index >= n {
            return Err(format!("index {index} is out of range for {n} points"));
        }
        if seen[index] {
            return Err(format!("index {index} appears more than once"));
        }
        seen[index] = true;
    }
    Ok(())
}

/// A computed tour over one group.
#[derive(Debug, Clone, PartialEq)]
pub struct TourResult {
    members: Vec<PointId>,
    order: Vec<usize>,
    length: f64,
}

impl TourResult {
    /// IDs of the group members, in store order at the time of computation.
    /// `order` indexes into this list.
    pub fn members(&self) -> &[PointId] {
        &self.members
    }

    /// Visiting order as indices into [`TourResult::members`].
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Closed tour length in grid units.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Member IDs in visiting order.
    pub fn ordered_ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.order.iter().map(move |&i| self.members[i])
    }
}

/// Cached tour results for both groups.
///
/// A group's entry is `None` when no tour has been computed, when the group had two
/// or fewer members, or when a mutation made the previous result stale.
#[derive(Debug, Clone, Default)]
pub struct TourCache {
    group_a: Option<TourResult>,
    group_b: Option<TourResult>,
}

impl TourCache {
    /// Cached result for `group`, if any.
    pub fn get(&self, group: TourGroup) -> Option<&TourResult> {
        match group {
            TourGroup::A => self.group_a.as_ref(),
            TourGroup::B => self.group_b.as_ref(),
        }
    }

    fn slot(&mut self, group: TourGroup) -> &mut Option<TourResult> {
        match group {
            TourGroup::A => &mut self.group_a,
            TourGroup::B => &mut self.group_b,
        }
    }

    /// Whether neither group has a cached tour.
    pub fn is_empty(&self) -> bool {
        self.group_a.is_none() && self.group_b.is_none()
    }

    /// Discards the cached tour of `group`.
    pub fn invalidate(&mut self, group: TourGroup) {
        if self.slot(group).take().is_some() {
            debug!("Discarded stale tour for {group}");
        }
    }

    /// Discards the tour of the group `tag` belongs to, if it is tourable.
    pub fn invalidate_tag(&mut self, tag: ColorTag) {
        if let Some(group) = tag.group() {
            self.invalidate(group);
        }
    }

    /// Discards both cached tours.
    pub fn clear(&mut self) {
        self.group_a = None;
        self.group_b = None;
    }

    /// Recomputes tours for both groups from the current store contents.
    ///
    /// Existing results are discarded first. Groups with two or fewer members get no
    /// tour. Blocks until the solver has exhausted its budget for each group.
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidTour`] if the solver returns something other than a
    /// permutation; that group's entry stays empty. The other group is still
    /// computed, and the first failure is the one returned.
    pub fn compute(&mut self, store: &PointStore, solver: &dyn TourSolver) -> EditorResult<()> {
        self.clear();
        let budget = SolverBudget::default();
        let mut first_error = None;

        for group in TourGroup::BOTH {
            let members = store.members_of(group);
            if members.len() <= 2 {
                info!("Skipping tour for {group}: {} point(s)", members.len());
                continue;
            }

            let positions: Vec<(f64, f64)> = members.iter().map(|p| p.position).collect();
            let distances = DistanceMatrix::from_positions(&positions);
            let order = solver.solve(&distances, &budget);
            if let Err(reason) = validate_permutation(&order, members.len()) {
                warn!("Rejected tour for {group}: {reason}");
                if first_error.is_none() {
                    first_error = Some(EditorError::InvalidTour { group, reason });
                }
                continue;
            }

            let length = distances.tour_length(&order);
            info!(
                "Computed tour for {group}: {} points, length {length:.3}",
                members.len()
            );
            *self.slot(group) = Some(TourResult {
                members: members.iter().map(|p| p.id).collect(),
                order,
                length,
            });
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
