use std::error::Error;

use rand::{Rng, SeedableRng};
use road_astar::{
    codec::*,
    error::Error as GraphError,
    types::*,
};

fn random_graph<R: Rng>(gen: &mut R, n: usize, max_degree: usize) -> NodeGraph {
    let mut id = 0;
    let nodes = (0..n)
        .map(|_| {
            id += gen.gen_range(1..1000);
            Node::new(id, gen.gen_range(35.0..44.0), gen.gen_range(-9.0..4.0))
        })
        .collect();

    let mut first_out = vec![0];
    let mut successors = vec![];
    for _ in 0..n {
        // degree zero is frequent on purpose, duplicates and self loops are allowed
        for _ in 0..gen.gen_range(0..=max_degree) {
            successors.push(gen.gen_range(0..n));
        }
        first_out.push(successors.len());
    }

    NodeGraph::new(nodes, first_out, successors).unwrap()
}

fn encoded(graph: &NodeGraph) -> Vec<u8> {
    let mut bytes = Vec::new();
    encode(graph, &mut bytes).unwrap();
    bytes
}

#[test]
fn round_trip_in_memory() -> Result<(), Box<dyn Error>> {
    let mut gen = rand::rngs::StdRng::seed_from_u64(7);

    for (n, max_degree) in [(0, 0), (1, 0), (1, 1), (5, 0), (20, 1), (100, 6)] {
        let graph = random_graph(&mut gen, n, max_degree);
        let bytes = encoded(&graph);
        assert_eq!(bytes.len() as u64, expected_file_size(n as u64, graph.num_arcs() as u64).unwrap());

        let decoded = decode(&mut bytes.as_slice())?;
        assert_eq!(decoded, graph);
        for node in 0..n {
            assert_eq!(decoded.neighbors(node), graph.neighbors(node));
        }
    }

    Ok(())
}

#[test]
fn round_trip_through_a_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("graph.bin");
    let mut gen = rand::rngs::StdRng::seed_from_u64(8);
    let graph = random_graph(&mut gen, 250, 4);

    write_binary_file(&path, &graph)?;
    assert_eq!(read_binary_file(&path)?, graph);
    Ok(())
}

#[test]
fn layout_of_header_and_records() -> Result<(), Box<dyn Error>> {
    assert_eq!(RECORD_BYTES, 40);

    let nodes = vec![Node::new(11, 41.5, 2.25), Node::new(12, 41.0, 2.0)];
    let graph = NodeGraph::new(nodes, vec![0, 0, 2], vec![0, 1])?;
    let bytes = encoded(&graph);
    let word = |i: usize| u64::from_ne_bytes(bytes[i * 8..(i + 1) * 8].try_into().unwrap());

    assert_eq!(word(0), 2);
    assert_eq!(word(1), 2);
    // first record: id, lat, lon, successor count, pointer placeholder
    assert_eq!(word(2), 11);
    assert_eq!(f64::from_bits(word(3)), 41.5);
    assert_eq!(f64::from_bits(word(4)), 2.25);
    assert_eq!(word(5), 0);
    assert_eq!(word(6), 0);
    assert_eq!(word(10), 2);
    // successors of node 1
    assert_eq!(word(12), 0);
    assert_eq!(word(13), 1);
    Ok(())
}

#[test]
fn successor_pointer_on_disk_is_ignored() -> Result<(), Box<dyn Error>> {
    let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)];
    let graph = NodeGraph::new(nodes, vec![0, 1, 2], vec![1, 0])?;
    let mut bytes = encoded(&graph);
    let ptr_field = 16 + 4 * 8;
    bytes[ptr_field..ptr_field + 8].copy_from_slice(&0xdead_beef_u64.to_ne_bytes());

    assert_eq!(decode(&mut bytes.as_slice())?, graph);
    Ok(())
}

#[test]
fn truncated_data_is_a_format_error() {
    let mut gen = rand::rngs::StdRng::seed_from_u64(9);
    let bytes = encoded(&random_graph(&mut gen, 10, 3));

    for len in [0, 7, 16, 17, 16 + 40, bytes.len() - 1] {
        let result = decode(&mut &bytes[..len]);
        assert!(matches!(result, Err(GraphError::Format(_))), "length {}", len);
    }
}

#[test]
fn corrupt_contents_are_format_errors() {
    let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)];
    let graph = NodeGraph::new(nodes, vec![0, 1, 2], vec![1, 0]).unwrap();
    let bytes = encoded(&graph);

    let mut trailing = bytes.clone();
    trailing.push(0);
    assert!(matches!(decode(&mut trailing.as_slice()), Err(GraphError::Format(_))));

    let mut dangling = bytes.clone();
    let last = dangling.len() - 8;
    dangling[last..].copy_from_slice(&2u64.to_ne_bytes());
    assert!(matches!(decode(&mut dangling.as_slice()), Err(GraphError::Format(_))));

    let mut unsorted = bytes.clone();
    unsorted[16..24].copy_from_slice(&3u64.to_ne_bytes());
    assert!(matches!(decode(&mut unsorted.as_slice()), Err(GraphError::Format(_))));

    let mut miscounted = bytes;
    let count_field = 16 + 3 * 8;
    miscounted[count_field..count_field + 8].copy_from_slice(&2u64.to_ne_bytes());
    assert!(matches!(decode(&mut miscounted.as_slice()), Err(GraphError::Format(_))));
}

#[test]
fn file_errors() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;

    let missing = read_binary_file(dir.path().join("missing.bin")).unwrap_err();
    assert!(matches!(missing, GraphError::File { .. }));
    assert_eq!(missing.exit_code(), 2);

    let path = dir.path().join("huge_header.bin");
    let header: Vec<u8> = [u64::MAX, 1].iter().flat_map(|v| v.to_ne_bytes()).collect();
    std::fs::write(&path, header)?;
    let corrupt = read_binary_file(&path).unwrap_err();
    assert!(matches!(corrupt, GraphError::Format(_)));
    assert_eq!(corrupt.exit_code(), 3);

    let unwritable = write_binary_file(dir.path().join("no_such_dir").join("graph.bin"), &NodeGraph::empty()).unwrap_err();
    assert!(matches!(unwritable, GraphError::File { .. }));
    Ok(())
}

#[test]
fn short_write_is_a_format_error() {
    let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)];
    let graph = NodeGraph::new(nodes, vec![0, 1, 2], vec![1, 0]).unwrap();

    // room for the header, but not for the node records
    let mut buffer = [0u8; 20];
    let err = encode(&graph, &mut &mut buffer[..]).unwrap_err();
    assert!(matches!(err, GraphError::Format(_)));
    assert_eq!(err.exit_code(), 3);

    let mut exact = vec![0u8; expected_file_size(2, 2).unwrap() as usize];
    encode(&graph, &mut &mut exact[..]).unwrap();
    assert_eq!(decode(&mut exact.as_slice()).unwrap(), graph);
}
