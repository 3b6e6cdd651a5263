use chaintable::{ChainTable, Key, TableError};

fn main() -> Result<(), TableError> {
    env_logger::init();

    let mut table = ChainTable::new(|key: Key| (key % 4) as usize, 4)?;

    table.insert(1, "hello".to_string());
    table.insert(5, "world".to_string());

    assert!(table.contains_key(1));
    println!("Value: {:?}", table.get(1));
    println!("Bucket 1 holds {:?} entries", table.bucket_len(1));

    let removed = table.remove(5);
    println!("Removed: {:?}", removed);

    table.delete(1);
    println!("Table after delete: {:?}", table);

    Ok(())
}
