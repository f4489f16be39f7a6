mod test_symbol_table;
mod test_type_map;
mod test_typevar_table;
