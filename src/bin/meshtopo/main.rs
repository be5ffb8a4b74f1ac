//! Meshtopo CLI - mesh topology inspection tool.
//!
//! Usage: meshtopo <COMMAND> [OPTIONS] <INPUT>
//!
//! The input is a text file holding the flat corner array: integers separated
//! by whitespace or commas, each face terminated by `-1`.
//!
//! Run `meshtopo --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::info;

use meshtopo::error::TopologyError;
use meshtopo::mesh::{ClassifierOptions, PolygonMesh, VertexId};

#[derive(Parser)]
#[command(name = "meshtopo")]
#[command(author, version, about = "Mesh topology CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh counts and classification
    Info {
        /// Corner array file
        input: PathBuf,

        /// Number of vertices (default: largest index + 1)
        #[arg(short = 'n', long)]
        vertices: Option<usize>,

        /// Merge vertex fans across singular edges
        #[arg(long)]
        merge_singular_edges: bool,

        /// List singular edges and vertices
        #[arg(short, long)]
        list: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info {
            input,
            vertices,
            merge_singular_edges,
            list,
        } => {
            cmd_info(&input, vertices, merge_singular_edges, list)?;
        }
    }
    Ok(())
}

/// Parse integers separated by whitespace or commas.
fn parse_corners(text: &str) -> Result<Vec<i32>, TopologyError> {
    text.split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<i32>().map_err(|_| TopologyError::Parse {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

fn load_corners(path: &Path) -> Result<Vec<i32>, TopologyError> {
    let text = std::fs::read_to_string(path)?;
    parse_corners(&text)
}

fn cmd_info(
    input: &Path,
    vertices: Option<usize>,
    merge_singular_edges: bool,
    list: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let corners = load_corners(input)?;
    let num_vertices = vertices.unwrap_or_else(|| {
        corners
            .iter()
            .copied()
            .max()
            .map_or(0, |max| (i64::from(max) + 1).max(0) as usize)
    });
    info!("Loaded {} corners from {}", corners.len(), input.display());

    let options = if merge_singular_edges {
        ClassifierOptions::default().merge_singular_edges()
    } else {
        ClassifierOptions::default()
    };

    let start = Instant::now();
    let mesh: PolygonMesh = PolygonMesh::with_options(num_vertices, &corners, options)?;
    let elapsed = start.elapsed();

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Corners: {}", mesh.num_corners());
    println!("Edges: {}", mesh.num_edges());

    let boundary_edges = mesh.edge_ids().filter(|&e| mesh.is_boundary_edge(e)).count();
    let regular_edges = mesh.edge_ids().filter(|&e| mesh.is_regular_edge(e)).count();
    let singular_edges = mesh.edge_ids().filter(|&e| mesh.is_singular_edge(e)).count();
    println!(
        "Edge types: {} boundary, {} regular, {} singular",
        boundary_edges, regular_edges, singular_edges
    );

    let classification = mesh.classification();
    println!(
        "Vertex types: {} boundary, {} singular",
        classification.num_boundary_vertices(),
        classification.num_singular_vertices()
    );

    if mesh.is_regular() {
        println!("Topology: Manifold");
    } else {
        println!("Topology: Non-manifold");
    }
    if mesh.has_boundary() {
        println!("Boundary: Open");
    } else {
        println!("Boundary: Closed");
    }
    if mesh.is_oriented() {
        println!("Orientation: Consistent");
    } else {
        println!("Orientation: Inconsistent");
    }

    if list {
        for e in mesh.edge_ids().filter(|&e| mesh.is_singular_edge(e)) {
            let (v0, v1) = mesh.edge_vertices(e);
            println!(
                "Singular edge {}: ({}, {}) with {} faces",
                e.index(),
                v0.index(),
                v1.index(),
                mesh.edge_face_count(e)
            );
        }
        for v in (0..mesh.num_vertices()).map(VertexId::<u32>::new) {
            if mesh.is_singular_vertex(v) {
                println!(
                    "Singular vertex {}: {} fans",
                    v.index(),
                    mesh.vertex_fan_count(v)
                );
            }
        }
    }

    println!("Built in {:.2?}", elapsed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corners() {
        let corners = parse_corners("0 1 2 -1\n1, 3, 2, -1\n").unwrap();
        assert_eq!(corners, vec![0, 1, 2, -1, 1, 3, 2, -1]);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_corners("0 1 x -1").unwrap_err();
        assert!(matches!(err, TopologyError::Parse { position: 2, .. }));
    }
}
