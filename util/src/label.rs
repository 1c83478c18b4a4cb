use ndarray::{Array2, ArrayView2};

///
/// 8-connected components of a single boolean plane
///
/// `labels` holds 0 for background and `1..=areas.len()` for active pixels.
/// Labels are numbered in raster order of each component's first pixel, so
/// they are deterministic for a given plane. `areas[label - 1]` is the pixel
/// count of `label`.
///
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    pub labels: Array2<u32>,
    pub areas: Vec<usize>,
}

impl ComponentLabels {
    pub fn count(&self) -> usize {
        self.areas.len()
    }

    /// Pixel count of the given label (0 for background or unknown labels)
    pub fn area(&self, label: u32) -> usize {
        match label {
            0 => 0,
            l => self.areas.get(l as usize - 1).copied().unwrap_or(0),
        }
    }
}

///
/// Two-pass labeling with union-find
///
/// The first pass assigns provisional labels looking at the already visited
/// neighbours (west, north-west, north, north-east) and records equivalences;
/// the second pass resolves every provisional label to its final one.
///
pub fn label_components(plane: ArrayView2<bool>) -> ComponentLabels {
    let (height, width) = plane.dim();
    let mut labels = Array2::<u32>::zeros((height, width));
    let mut sets = DisjointSet::new();

    for y in 0..height {
        for x in 0..width {
            if !plane[[y, x]] {
                continue;
            }
            let mut neighbors = [0u32; 4];
            let mut count = 0;
            let mut visit = |label: u32| {
                if label != 0 {
                    neighbors[count] = label;
                    count += 1;
                }
            };
            if x > 0 {
                visit(labels[[y, x - 1]]);
            }
            if y > 0 {
                if x > 0 {
                    visit(labels[[y - 1, x - 1]]);
                }
                visit(labels[[y - 1, x]]);
                if x + 1 < width {
                    visit(labels[[y - 1, x + 1]]);
                }
            }

            labels[[y, x]] = if count == 0 {
                sets.make_set()
            } else {
                let base = neighbors[0];
                for &n in &neighbors[1..count] {
                    sets.union(base, n);
                }
                base
            };
        }
    }

    // Provisional root -> final label, assigned in raster order
    let mut relabel = vec![0u32; sets.len()];
    let mut areas = Vec::new();
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = sets.find(*label) as usize;
        if relabel[root] == 0 {
            areas.push(0);
            relabel[root] = areas.len() as u32;
        }
        *label = relabel[root];
        areas[*label as usize - 1] += 1;
    }

    ComponentLabels { labels, areas }
}

struct DisjointSet {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl DisjointSet {

    // Slot 0 is the background and never joins a set
    fn new() -> Self {
        DisjointSet { parent: vec![0], rank: vec![0] }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        self.rank.push(0);
        id
    }

    fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (rank_a, rank_b) = (self.rank[ra as usize], self.rank[rb as usize]);
        if rank_a < rank_b {
            self.parent[ra as usize] = rb;
        } else {
            self.parent[rb as usize] = ra;
            if rank_a == rank_b {
                self.rank[ra as usize] += 1;
            }
        }
    }
}
