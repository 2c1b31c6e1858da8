use stepwise_pathfinding::Grid;

// The end is sealed off by walls, so the search finalizes every cell it can reach and returns
// an empty path.
//  ___
// |S..|
// |..#|
// |.#E|
//  ___

fn main() {
    let mut grid = Grid::from_ascii("S..\n..#\n.#E").unwrap();
    let (start, end) = (grid.start(), grid.end());
    println!("{}", grid);
    println!("Reachable: {}", grid.reachable(start, end).unwrap());
    let result = grid.search().unwrap();
    println!(
        "Finalized {} cells, path length {}",
        result.visited.len(),
        result.path.len()
    );
}
