fn main() {
    ochre_bin::main()
}
