use tensor_view::{shape, TensorViewMut};

shape! {
    /// A 2x2x2x2 hypercube.
    Hypercube = [2, 2, 2, 2]
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let mut data = vec![0.0_f64; 16];

    let mut tensor = TensorViewMut::<_, Hypercube>::new(&mut data);
    tensor[&[0, 0, 0, 0]] = 1.0;
    tensor[&[1, 0, 1, 0]] = 2.0;
    tensor[&[0, 1, 1, 1]] = 99.0;

    for (i, value) in data.iter().enumerate() {
        println!("{i}\t{value}");
    }
}
