use arena_avl::AvlTreeSet;

fn main() {
    let mut numbers = AvlTreeSet::new();
    for value in [50, 20, 80, 10, 30, 70, 90, 25] {
        println!("add {value} {}", numbers.insert(value));
    }
    println!("add 30 {}", numbers.insert(30));
    println!("size {}", numbers.len());
    println!("print:{}", numbers.structure_string());
    println!("remove 20 {}", numbers.remove(&20));
    println!("remove 21 {}", numbers.remove(&21));
    println!("find 20 {}", numbers.find(&20));
    println!("find 25 {}", numbers.find(&25));
    println!("tree: {}", numbers.in_order_string());
    numbers.clear();
    println!("clear true");
    println!("tree: {}", numbers.in_order_string());

    let mut words = AvlTreeSet::new();
    for word in ["kiwi", "apple", "mango", "banana"] {
        words.insert(word.to_string());
    }
    print!("{{ ");
    for word in &words {
        print!("{word}, ");
    }
    println!("}}");
}
