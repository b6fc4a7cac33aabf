use arena_avl::AvlTreeSet;

fn main() {
    let mut set = AvlTreeSet::new();
    for value in 1..=7 {
        set.insert(value);
        println!("After inserting {value}:{}", set.structure_string());
    }

    for value in [4, 1] {
        set.remove(&value);
        println!("After removing {value}:{}", set.structure_string());
    }
}
